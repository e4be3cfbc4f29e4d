use chutes::{validate_action, Action, ActionResult, Board, PlayerIdx, Spinner, TurnPhase};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::player::Player;
use crate::GameConfig;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Win,
    Forfeit,
    IllegalMove,
    Draw,
    MaxTurns,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Reason::Win => "win",
            Reason::Forfeit => "forfeit",
            Reason::IllegalMove => "illegal_move",
            Reason::Draw => "draw",
            Reason::MaxTurns => "max_turns",
        };
        write!(f, "{}", name)
    }
}

/// One validated action, legal or not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based, counting both players' turns.
    pub turn_number: usize,
    pub player: PlayerIdx,
    pub tool: String,
    pub args: Map<String, Value>,
    pub board_before: Board,
    /// Differs from `board_before` only when the action ended the turn with a move.
    pub board_after: Board,
    pub result: ActionResult,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameResult {
    /// `None` for a draw.
    pub winner: Option<PlayerIdx>,
    pub reason: Reason,
    pub turns: usize,
    pub log: Vec<LogEntry>,
}

/// Gets notified about every action right after it has been validated.
pub trait ActionObserver {
    fn on_action(&mut self, entry: &LogEntry);
}

impl ActionObserver for Vec<LogEntry> {
    fn on_action(&mut self, entry: &LogEntry) {
        self.push(entry.clone());
    }
}

impl<O: ActionObserver + ?Sized> ActionObserver for &mut O {
    fn on_action(&mut self, entry: &LogEntry) {
        (**self).on_action(entry)
    }
}

/// Emits every action as a debug event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl ActionObserver for TracingObserver {
    fn on_action(&mut self, entry: &LogEntry) {
        let args = Value::Object(entry.args.clone());
        debug!(
            turn = entry.turn_number,
            player = entry.player,
            tool = %entry.tool,
            args = %args,
            ok = entry.result.ok,
            "{}",
            entry.result.message
        );
    }
}

struct Ending {
    winner: Option<PlayerIdx>,
    reason: Reason,
}

/// Plays one game between two players.
pub struct GameRunner<'a, S> {
    players: [&'a mut dyn Player; 2],
    config: GameConfig,
    spinner: S,
    board: Board,
    log: Vec<LogEntry>,
    observers: Vec<Box<dyn ActionObserver + 'a>>,
    draw_offered_by: Option<PlayerIdx>,
    // Chat messages waiting to be shown to each player
    inbox: [Vec<String>; 2],
}

impl<'a, S: Spinner> GameRunner<'a, S> {
    /// Player 0 takes the first turn.
    pub fn new(players: [&'a mut dyn Player; 2], config: GameConfig, spinner: S) -> Self {
        Self {
            players,
            config,
            spinner,
            board: Board::default(),
            log: Vec::new(),
            observers: Vec::new(),
            draw_offered_by: None,
            inbox: [Vec::new(), Vec::new()],
        }
    }

    /// Starts from the given positions instead of an empty board.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Registers an observer in addition to the game's own log.
    pub fn with_observer(mut self, observer: impl ActionObserver + 'a) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Returns an error only on communication failure, not when an
    /// illegal move is played.
    pub fn play(mut self) -> anyhow::Result<GameResult> {
        for (player_idx, player) in self.players.iter_mut().enumerate() {
            player.new_game(player_idx)?;
        }

        let mut turns = 0;
        let mut player_idx = 0;
        let ending = loop {
            if turns >= self.config.max_turns {
                break Ending {
                    winner: None,
                    reason: Reason::MaxTurns,
                };
            }
            turns += 1;
            if let Some(ending) = self.play_turn(player_idx, turns)? {
                break ending;
            }
            player_idx = 1 - player_idx;
        };

        info!(
            winner = ending.winner.map(|idx| self.players[idx].name()),
            reason = %ending.reason,
            turns,
            "Game over"
        );
        debug!("Final board:\n{}", chutes::visualize_board(&self.board));

        Ok(GameResult {
            winner: ending.winner,
            reason: ending.reason,
            turns,
            log: self.log,
        })
    }

    fn play_turn(
        &mut self,
        player_idx: PlayerIdx,
        turn_number: usize,
    ) -> anyhow::Result<Option<Ending>> {
        let opponent_idx = 1 - player_idx;

        let mut observation = self.make_observation(player_idx);
        // An offer only stands for the opponent's next turn
        let draw_offered_to_me = self.draw_offered_by == Some(opponent_idx);
        if draw_offered_to_me {
            self.draw_offered_by = None;
        }
        let mut phase = TurnPhase::new(draw_offered_to_me);

        for _ in 0..self.config.max_actions_per_turn {
            let call = self.players[player_idx].next_action(&observation)?;
            let action = Action::from_tool_call(&call);
            let result = match &action {
                Ok(action) => validate_action(
                    &self.board,
                    player_idx,
                    action,
                    &mut phase,
                    &mut self.spinner,
                ),
                Err(err) => ActionResult::illegal(err),
            };

            let board_before = self.board;
            if result.won || result.turn_over {
                if let Some(final_square) = phase.current_position {
                    self.board.set_position(player_idx, final_square);
                }
            }
            self.record(LogEntry {
                turn_number,
                player: player_idx,
                tool: call.tool,
                args: call.args,
                board_before,
                board_after: self.board,
                result: result.clone(),
            });

            if !result.ok {
                info!(
                    player = self.players[player_idx].name(),
                    turn_number, "Illegal move by player: {}", result.message
                );
                return Ok(Some(Ending {
                    winner: Some(opponent_idx),
                    reason: Reason::IllegalMove,
                }));
            }
            if result.forfeit {
                return Ok(Some(Ending {
                    winner: Some(opponent_idx),
                    reason: Reason::Forfeit,
                }));
            }
            if result.draw {
                return Ok(Some(Ending {
                    winner: None,
                    reason: Reason::Draw,
                }));
            }
            match action {
                Ok(Action::OfferDraw) => self.draw_offered_by = Some(player_idx),
                Ok(Action::SendMessage { message }) => self.inbox[opponent_idx].push(message),
                _ => {}
            }
            if result.won {
                return Ok(Some(Ending {
                    winner: Some(player_idx),
                    reason: Reason::Win,
                }));
            }
            if result.turn_over {
                return Ok(None);
            }

            self.players[player_idx].observe(&result.message)?;
            observation = result.message;
        }

        warn!(
            player = self.players[player_idx].name(),
            turn_number, "Turn abandoned after reaching the action limit"
        );
        Ok(None)
    }

    fn record(&mut self, entry: LogEntry) {
        for observer in self.observers.iter_mut() {
            observer.on_action(&entry);
        }
        self.log.on_action(&entry);
    }

    fn make_observation(&mut self, player_idx: PlayerIdx) -> String {
        let opponent_idx = 1 - player_idx;
        let my_pos = self.board.position(player_idx);
        let opp_pos = self.board.position(opponent_idx);
        let mut msg = if my_pos == 0 {
            format!(
                "Your turn. You are not yet on the board. Opponent is on square {}.",
                opp_pos
            )
        } else {
            format!(
                "Your turn. You are on square {}. Opponent is on square {}.",
                my_pos, opp_pos
            )
        };
        if self.draw_offered_by == Some(opponent_idx) {
            msg += " Your opponent has offered a draw.";
        }
        for text in self.inbox[player_idx].drain(..) {
            msg += &format!(" Your opponent says: \"{}\"", text);
        }
        msg
    }
}
