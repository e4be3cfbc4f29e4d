use quickcheck::{Arbitrary, Gen};

use crate::{Square, FINAL_SQUARE, SPINNER_MAX};

/// A pawn position before the spin, and the spin itself.
#[derive(Clone, Debug)]
pub struct TurnStart {
    // Never the final square, since the game is over then
    pub start: Square,
    pub spin: u8,
}

impl Arbitrary for TurnStart {
    fn arbitrary(g: &mut Gen) -> Self {
        // Bias towards the end of the board, where bounces happen
        let start = if bool::arbitrary(g) {
            FINAL_SQUARE - 1 - u8::arbitrary(g) % 12
        } else {
            u8::arbitrary(g) % FINAL_SQUARE
        };
        let spin = 1 + u8::arbitrary(g) % SPINNER_MAX;
        TurnStart { start, spin }
    }
}

/// A turn start followed by a sequence of move targets near the pawn.
#[derive(Clone, Debug)]
pub struct StepPlan {
    pub start: Square,
    pub spin: u8,
    pub targets: Vec<i64>,
}

impl Arbitrary for StepPlan {
    fn arbitrary(g: &mut Gen) -> Self {
        let TurnStart { start, spin } = TurnStart::arbitrary(g);
        let num_targets = usize::arbitrary(g) % 8;
        let targets = (0..num_targets)
            .map(|_| i64::from(start) - 3 + i64::from(u8::arbitrary(g) % 30))
            .collect();
        StepPlan {
            start,
            spin,
            targets,
        }
    }
}
