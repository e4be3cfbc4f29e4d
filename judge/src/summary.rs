use chutes::{PlayerIdx, Square};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::game::{LogEntry, Reason};

/// How a player-turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    Normal,
    Win,
    IllegalMove,
    Forfeit,
    Draw,
}

/// One player-turn, condensed from the action log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    pub turn_number: usize,
    pub player: PlayerIdx,
    pub start_position: Square,
    pub end_position: Square,
    pub spin_value: Option<u8>,
    pub outcome: TurnOutcome,
    pub actions_count: usize,
}

/// Condenses a game log into one summary per turn that has at least one action.
///
/// `reason` and `turns` are those of the game result. They are needed to mark
/// the final turn of a game that ended by agreement.
pub fn summarize_turns(log: &[LogEntry], reason: Reason, turns: usize) -> Vec<TurnSummary> {
    let mut summaries = Vec::new();
    for (turn_number, entries) in &log.iter().chunk_by(|entry| entry.turn_number) {
        let entries: Vec<&LogEntry> = entries.collect();
        let (first, last) = (entries[0], entries[entries.len() - 1]);
        let player = first.player;

        let mut outcome = TurnOutcome::Normal;
        for entry in &entries {
            if entry.result.won {
                outcome = TurnOutcome::Win;
            } else if !entry.result.ok {
                outcome = TurnOutcome::IllegalMove;
            } else if entry.result.forfeit {
                outcome = TurnOutcome::Forfeit;
            }
        }
        if reason == Reason::Draw && turn_number == turns {
            outcome = TurnOutcome::Draw;
        }

        summaries.push(TurnSummary {
            turn_number,
            player,
            start_position: first.board_before.position(player),
            end_position: last.board_after.position(player),
            spin_value: entries.iter().find_map(|entry| entry.result.spin_value),
            outcome,
            actions_count: entries.len(),
        });
    }
    summaries
}

#[cfg(test)]
mod tests {
    use chutes::{Action, Board, ScriptedSpinner};

    use super::*;
    use crate::{GameConfig, GameRunner, ScriptedPlayer};

    #[test]
    fn summaries_of_a_short_game() {
        let mut p0 = ScriptedPlayer::from_actions(
            "A",
            &[
                Action::Plan {
                    thought: String::from("climb"),
                },
                Action::Spin,
                Action::MoveTo { square: 14 },
                Action::EndTurn,
                Action::Spin,
                Action::MoveTo { square: 15 },
            ],
        );
        let mut p1 = ScriptedPlayer::from_actions("B", &[Action::Spin, Action::EndTurn]);
        let result = GameRunner::new(
            [&mut p0, &mut p1],
            GameConfig::default(),
            ScriptedSpinner::new([4u8, 2, 1]),
        )
        .play()
        .unwrap();
        assert_eq!(result.reason, Reason::IllegalMove);
        assert_eq!(result.winner, Some(0));

        let summaries = summarize_turns(&result.log, result.reason, result.turns);
        assert_eq!(
            summaries,
            [
                TurnSummary {
                    turn_number: 1,
                    player: 0,
                    start_position: 0,
                    end_position: 14,
                    spin_value: Some(4),
                    outcome: TurnOutcome::Normal,
                    actions_count: 4,
                },
                TurnSummary {
                    turn_number: 2,
                    player: 1,
                    start_position: 0,
                    end_position: 0,
                    spin_value: Some(2),
                    outcome: TurnOutcome::IllegalMove,
                    actions_count: 2,
                },
            ]
        );
    }

    #[test]
    fn last_turn_of_a_draw() {
        let mut p0 = ScriptedPlayer::from_actions(
            "A",
            &[Action::OfferDraw, Action::Spin, Action::MoveTo { square: 96 }, Action::EndTurn],
        );
        let mut p1 = ScriptedPlayer::from_actions("B", &[Action::AcceptDraw]);
        let result = GameRunner::new(
            [&mut p0, &mut p1],
            GameConfig::default(),
            ScriptedSpinner::new([1u8]),
        )
        .with_board(Board::new([95, 90]))
        .play()
        .unwrap();
        let summaries = summarize_turns(&result.log, result.reason, result.turns);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].outcome, TurnOutcome::Normal);
        assert_eq!(summaries[0].start_position, 95);
        assert_eq!(summaries[0].end_position, 96);
        assert_eq!(summaries[1].outcome, TurnOutcome::Draw);
        assert_eq!(summaries[1].spin_value, None);
    }

    #[test]
    fn empty_log() {
        assert!(summarize_turns(&[], Reason::MaxTurns, 0).is_empty());
    }
}
