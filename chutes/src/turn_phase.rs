use crate::{resting_square, shortcut_kind, Resting, ShortcutKind, Square};

/// Tracks what a player has done so far this turn.
///
/// A fresh phase is created at the start of every turn and thrown away when
/// the turn ends. The board itself is never touched while a turn is in
/// progress, only this record is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnPhase {
    /// The value shown by the spinner, once it has been spun.
    pub spin_value: Option<u8>,
    /// The pawn's committed position when the spinner was spun.
    pub start_position: Square,
    /// Where the pawn is during multi-step movement. `None` until the first move.
    pub current_position: Option<Square>,
    /// Set once the pawn stands on the turn's final resting square.
    /// No further movement is accepted after that.
    pub reached_final: bool,
    /// The opponent offered a draw that this player may accept.
    pub draw_offered_to_me: bool,
}

impl TurnPhase {
    pub fn new(draw_offered_to_me: bool) -> Self {
        Self {
            draw_offered_to_me,
            ..Self::default()
        }
    }

    /// A phase in which the spinner has already shown `spin`.
    pub fn after_spin(start_position: Square, spin: u8) -> Self {
        Self {
            spin_value: Some(spin),
            start_position,
            ..Self::default()
        }
    }

    pub fn has_spun(&self) -> bool {
        self.spin_value.is_some()
    }

    pub fn has_moved(&self) -> bool {
        self.current_position.is_some()
    }

    /// The pawn's position within the turn, falling back to the start position.
    pub fn position(&self) -> Square {
        self.current_position.unwrap_or(self.start_position)
    }

    fn resting(&self) -> Option<Resting> {
        self.spin_value
            .map(|spin| resting_square(self.start_position, spin))
    }

    /// `start + spin`, unless not spun yet or the spin overshoots.
    pub fn landing_square(&self) -> Option<Square> {
        self.resting().and_then(|r| r.landing)
    }

    pub fn final_resting_square(&self) -> Option<Square> {
        self.resting().map(|r| r.final_square)
    }

    /// The shortcut the pawn must take before the turn can end, if it is
    /// standing on the landing square and that square is a trigger.
    pub fn pending_shortcut(&self) -> Option<ShortcutKind> {
        let landing = self.landing_square()?;
        if self.reached_final || self.current_position != Some(landing) {
            return None;
        }
        shortcut_kind(landing)
    }
}
