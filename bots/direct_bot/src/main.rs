use chutes::{resting_square, Action, PlayerIdx, Square};
use chutes_bot_utils::{parse_spin, parse_turn_start, Bot};
use clap::Parser;

#[derive(Parser)]
struct Args {
    /// Accept every draw offer
    #[arg(long, default_value_t = false)]
    accept_draws: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    DirectBot {
        accept_draws: args.accept_draws,
        position: 0,
    }
    .run()
}

/// Spins, then moves straight to the square the spin leads to, shortcuts
/// included, and ends the turn.
struct DirectBot {
    accept_draws: bool,
    position: Square,
}

impl Bot for DirectBot {
    fn new_game(&mut self, _player_idx: PlayerIdx) {
        self.position = 0;
    }

    fn next_action(&mut self, observation: &str) -> Action {
        if let Some(turn_start) = parse_turn_start(observation) {
            self.position = turn_start.my_position;
            if turn_start.draw_offered && self.accept_draws {
                return Action::AcceptDraw;
            }
            Action::Spin
        } else if let Some(spin) = parse_spin(observation) {
            Action::MoveTo {
                square: i64::from(resting_square(self.position, spin).final_square),
            }
        } else {
            Action::EndTurn
        }
    }
}
