use std::collections::VecDeque;

use chutes::{resting_square, shortcut_kind, Action, PlayerIdx, ShortcutKind, Square};
use chutes_bot_utils::{parse_spin, parse_turn_start, Bot};
use clap::Parser;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Probability of accepting a draw offer
    #[arg(long, default_value_t = 0.1)]
    accept_draw_probability: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot {
        rng,
        accept_draw_probability: args.accept_draw_probability.clamp(0.0, 1.0),
        position: 0,
        plan: VecDeque::new(),
    }
    .run()
}

const CHATTER: [&str; 4] = ["Good luck!", "Nice spin.", "Watch out for 87.", "Hmm."];

/// Makes legal but unpredictable moves: wanders to the landing square in
/// random steps, or sometimes jumps straight through a shortcut.
struct RandomBot {
    rng: StdRng,
    accept_draw_probability: f64,
    position: Square,
    plan: VecDeque<Action>,
}

impl RandomBot {
    fn plan_movement(&mut self, spin: u8) {
        let start = self.position;
        let resting = resting_square(start, spin);
        let Some(landing) = resting.landing else {
            self.plan.push_back(Action::MoveTo {
                square: i64::from(start),
            });
            self.plan.push_back(Action::EndTurn);
            return;
        };

        let final_square = resting.final_square;
        if final_square != landing && self.rng.gen_bool(0.5) {
            self.plan.push_back(Action::MoveTo {
                square: i64::from(final_square),
            });
        } else {
            // Stepping onto the final square early would end the movement
            for square in (start + 1)..landing {
                if square != final_square && self.rng.gen_bool(0.3) {
                    self.plan.push_back(Action::MoveTo {
                        square: i64::from(square),
                    });
                }
            }
            self.plan.push_back(Action::MoveTo {
                square: i64::from(landing),
            });
            match shortcut_kind(landing) {
                Some(ShortcutKind::Ladder) => self.plan.push_back(Action::AscendLadder {
                    square: i64::from(final_square),
                }),
                Some(ShortcutKind::Chute) => self.plan.push_back(Action::DescendChute {
                    square: i64::from(final_square),
                }),
                None => {}
            }
        }
        self.plan.push_back(Action::EndTurn);
    }
}

impl Bot for RandomBot {
    fn new_game(&mut self, _player_idx: PlayerIdx) {
        self.position = 0;
        self.plan.clear();
    }

    fn next_action(&mut self, observation: &str) -> Action {
        if let Some(turn_start) = parse_turn_start(observation) {
            self.position = turn_start.my_position;
            self.plan.clear();
            if turn_start.draw_offered && self.rng.gen_bool(self.accept_draw_probability) {
                return Action::AcceptDraw;
            }
            if self.rng.gen_bool(0.1) {
                let message = CHATTER.choose(&mut self.rng).copied().unwrap_or("Hi.");
                self.plan.push_back(Action::SendMessage {
                    message: String::from(message),
                });
            }
            if self.rng.gen_bool(0.1) {
                self.plan.push_back(Action::Plan {
                    thought: format!("I'm on square {}.", self.position),
                });
            }
            self.plan.push_back(Action::Spin);
        } else if let Some(spin) = parse_spin(observation) {
            self.plan.clear();
            self.plan_movement(spin);
        }
        self.plan.pop_front().unwrap_or(Action::EndTurn)
    }
}

#[cfg(test)]
mod tests {
    use chutes::{validate_action, Board, ScriptedSpinner, TurnPhase};

    use super::*;

    #[test]
    fn planned_moves_are_legal() {
        let mut bot = RandomBot {
            rng: StdRng::seed_from_u64(7),
            accept_draw_probability: 0.0,
            position: 0,
            plan: VecDeque::new(),
        };
        let mut spinner = ScriptedSpinner::new([1u8]);
        for start in 0..100 {
            for spin in 1..=6 {
                for _ in 0..5 {
                    bot.position = start;
                    bot.plan.clear();
                    bot.plan_movement(spin);
                    let board = Board::new([start, 0]);
                    let mut phase = TurnPhase::after_spin(start, spin);
                    let last = bot
                        .plan
                        .iter()
                        .map(|action| validate_action(&board, 0, action, &mut phase, &mut spinner))
                        .inspect(|result| assert!(result.ok, "{}", result.message))
                        .last()
                        .unwrap();
                    let expected = resting_square(start, spin).final_square;
                    assert_eq!(phase.current_position, Some(expected));
                    // A win ends the game before the planned end of turn
                    assert!(last.turn_over || expected == 100);
                }
            }
        }
    }
}
