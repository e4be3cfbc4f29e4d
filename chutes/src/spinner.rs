use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::SPINNER_MAX;

/// The source of spin values, the only randomness in the game.
pub trait Spinner {
    /// Returns a value in `1..=6`.
    fn spin(&mut self) -> u8;
}

impl<S: Spinner + ?Sized> Spinner for &mut S {
    fn spin(&mut self) -> u8 {
        (**self).spin()
    }
}

/// Spins uniformly at random.
#[derive(Clone, Debug)]
pub struct RandomSpinner<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomSpinner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSpinner<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Spinner for RandomSpinner<R> {
    fn spin(&mut self) -> u8 {
        self.rng.gen_range(1..=SPINNER_MAX)
    }
}

/// Replays a fixed sequence of spins, starting over when it runs out.
#[derive(Clone, Debug)]
pub struct ScriptedSpinner {
    values: Vec<u8>,
    next: usize,
}

impl ScriptedSpinner {
    /// Panics if `values` is empty or contains a value the spinner can't show.
    pub fn new(values: impl Into<Vec<u8>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty());
        assert!(values.iter().all(|v| (1..=SPINNER_MAX).contains(v)));
        Self { values, next: 0 }
    }
}

impl Spinner for ScriptedSpinner {
    fn spin(&mut self) -> u8 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_spins_are_in_range_and_seeded() {
        let mut a = RandomSpinner::from_seed(7);
        let mut b = RandomSpinner::from_seed(7);
        for _ in 0..1000 {
            let value = a.spin();
            assert!((1..=6).contains(&value));
            assert_eq!(value, b.spin());
        }
    }

    #[test]
    fn scripted_spins_cycle() {
        let mut spinner = ScriptedSpinner::new([4u8, 2]);
        let spins: Vec<u8> = (0..5).map(|_| spinner.spin()).collect();
        assert_eq!(spins, [4, 2, 4, 2, 4]);
    }

    #[test]
    #[should_panic]
    fn scripted_spins_must_be_valid() {
        ScriptedSpinner::new([7u8]);
    }
}
