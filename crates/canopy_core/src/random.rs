//! The single random stream every stochastic decision draws from.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform draws used by the engine.
///
/// The orchestrator owns exactly one source and lends it to every system,
/// so a fixed seed plus a fixed population order reproduces a run.
pub trait RandomSource {
    /// Uniform double in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[0, bound)`. A bound of 0 or 1 yields 0.
    fn next_below(&mut self, bound: usize) -> usize;

    /// Bernoulli trial; `probability <= 0` never fires, `>= 1` always does.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Fair in-place permutation.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.next_below(i + 1);
            items.swap(i, j);
        }
    }
}

/// ChaCha8-backed source.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy-backed otherwise.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
