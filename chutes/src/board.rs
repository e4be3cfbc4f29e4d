use serde::{Deserialize, Serialize};

/// A square on the board. `0` means the pawn has not entered the board yet.
pub type Square = u8;

/// Index of a player, either `0` or `1`.
pub type PlayerIdx = usize;

/// Landing exactly on this square wins the game.
pub const FINAL_SQUARE: Square = 100;

/// The spinner shows values from 1 up to and including this one.
pub const SPINNER_MAX: u8 = 6;

/// Every ladder and chute on the board, as `(trigger, destination)` pairs.
///
/// Ladders come first, then chutes. A destination above the trigger is a
/// ladder, one below is a chute.
#[rustfmt::skip]
pub const SHORTCUTS: [(Square, Square); 19] = [
    // Ladders
    (1, 38), (4, 14), (9, 31), (21, 42), (28, 84),
    (36, 44), (51, 67), (71, 91), (80, 100),
    // Chutes
    (16, 6), (47, 26), (49, 11), (56, 53), (62, 19),
    (64, 60), (87, 24), (93, 73), (95, 75), (98, 78),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKind {
    /// Climbs to a higher square.
    Ladder,
    /// Slides to a lower square.
    Chute,
}

/// A single ladder or chute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortcut {
    pub from: Square,
    pub to: Square,
}

impl Shortcut {
    pub fn kind(&self) -> ShortcutKind {
        if self.to > self.from {
            ShortcutKind::Ladder
        } else {
            ShortcutKind::Chute
        }
    }
}

pub fn shortcuts() -> impl Iterator<Item = Shortcut> {
    SHORTCUTS.iter().map(|&(from, to)| Shortcut { from, to })
}

/// Where the ladder or chute starting at `square` leads, if there is one.
pub fn shortcut_destination(square: Square) -> Option<Square> {
    SHORTCUTS
        .iter()
        .find(|&&(from, _)| from == square)
        .map(|&(_, to)| to)
}

/// Whether `square` is the foot of a ladder, the top of a chute, or neither.
pub fn shortcut_kind(square: Square) -> Option<ShortcutKind> {
    shortcut_destination(square).map(|to| Shortcut { from: square, to }.kind())
}

/// The squares a pawn reaches with a given spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resting {
    /// `start + spin`, or `None` if that would be past the final square.
    pub landing: Option<Square>,
    /// Where the pawn must end the turn, after taking any shortcut.
    pub final_square: Square,
}

impl Resting {
    pub fn bounced(&self) -> bool {
        self.landing.is_none()
    }

    pub fn wins(&self) -> bool {
        self.final_square == FINAL_SQUARE
    }
}

/// Computes the landing and final resting square for a spin from `start`.
///
/// On an overshoot the pawn stays on `start`.
pub fn resting_square(start: Square, spin: u8) -> Resting {
    let target = u16::from(start) + u16::from(spin);
    if target > u16::from(FINAL_SQUARE) {
        return Resting {
            landing: None,
            final_square: start,
        };
    }
    let landing = target as Square;
    Resting {
        landing: Some(landing),
        final_square: shortcut_destination(landing).unwrap_or(landing),
    }
}

/// The committed positions of both pawns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "[Square; 2]", try_from = "[Square; 2]")]
pub struct Board {
    positions: [Square; 2],
}

impl Board {
    /// Panics if a position is past the final square.
    pub fn new(positions: [Square; 2]) -> Self {
        assert!(positions.iter().all(|&p| p <= FINAL_SQUARE));
        Self { positions }
    }

    pub fn position(&self, player: PlayerIdx) -> Square {
        self.positions[player]
    }

    pub fn positions(&self) -> [Square; 2] {
        self.positions
    }

    /// Panics if `square` is past the final square.
    pub fn set_position(&mut self, player: PlayerIdx, square: Square) {
        assert!(square <= FINAL_SQUARE, "square {} is off the board", square);
        self.positions[player] = square;
    }
}

impl From<Board> for [Square; 2] {
    fn from(board: Board) -> Self {
        board.positions
    }
}

impl TryFrom<[Square; 2]> for Board {
    type Error = String;

    fn try_from(positions: [Square; 2]) -> Result<Self, Self::Error> {
        match positions.iter().find(|&&p| p > FINAL_SQUARE) {
            Some(p) => Err(format!("square {} is off the board", p)),
            None => Ok(Self { positions }),
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::TurnStart;

    #[test]
    fn nine_ladders_and_ten_chutes() {
        let ladders = shortcuts()
            .filter(|s| s.kind() == ShortcutKind::Ladder)
            .count();
        let chutes = shortcuts()
            .filter(|s| s.kind() == ShortcutKind::Chute)
            .count();
        assert_eq!(ladders, 9);
        assert_eq!(chutes, 10);
    }

    #[test]
    fn triggers_are_unique_and_in_range() {
        for (idx, shortcut) in shortcuts().enumerate() {
            assert!((1..=FINAL_SQUARE).contains(&shortcut.from));
            assert!((1..=FINAL_SQUARE).contains(&shortcut.to));
            assert_ne!(shortcut.from, shortcut.to);
            assert!(shortcuts().skip(idx + 1).all(|s| s.from != shortcut.from));
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(shortcut_kind(4), Some(ShortcutKind::Ladder));
        assert_eq!(shortcut_kind(16), Some(ShortcutKind::Chute));
        assert_eq!(shortcut_kind(5), None);
        assert_eq!(shortcut_destination(80), Some(100));
        assert_eq!(shortcut_destination(98), Some(78));
        assert_eq!(shortcut_destination(100), None);
        assert_eq!(shortcut_destination(0), None);
    }

    #[test]
    fn resting_squares() {
        assert_eq!(
            resting_square(0, 3),
            Resting {
                landing: Some(3),
                final_square: 3
            }
        );
        assert_eq!(resting_square(0, 1).final_square, 38);
        assert_eq!(resting_square(10, 6).final_square, 6);
        assert_eq!(resting_square(25, 3).final_square, 84);
        assert!(resting_square(77, 3).wins());
        assert!(resting_square(96, 4).wins());
        let bounce = resting_square(96, 5);
        assert!(bounce.bounced());
        assert_eq!(bounce.final_square, 96);
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.positions(), [0, 0]);
        assert_eq!(serde_json::to_string(&board).unwrap(), "[0,0]");
    }

    #[test]
    fn loading_checks_positions() {
        let board: Board = serde_json::from_str("[100, 7]").unwrap();
        assert_eq!(board, Board::new([100, 7]));
        assert!(serde_json::from_str::<Board>("[101, 0]").is_err());
        assert!(serde_json::from_str::<Board>("[0, 150]").is_err());
    }

    quickcheck! {
        fn resting_square_stays_on_board(input: TurnStart) -> bool {
            let resting = resting_square(input.start, input.spin);
            resting.final_square <= FINAL_SQUARE
                && resting.landing.map_or(true, |l| l == input.start + input.spin)
        }
    }
}
