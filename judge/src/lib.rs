mod elo;
mod error;
mod game;
mod player;
mod recording;
mod summary;
pub use elo::*;
pub use error::*;
pub use game::*;
pub use player::*;
pub use recording::*;
pub use summary::*;

/// The limits of a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// The game is a draw after this many turns, counting both players' turns.
    pub max_turns: usize,
    /// A turn that hasn't ended after this many actions is abandoned.
    pub max_actions_per_turn: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_turns: 200,
            max_actions_per_turn: 20,
        }
    }
}
