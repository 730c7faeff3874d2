//! Random sample capability used by the Gaussian generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of standard normal draws.
///
/// The generator only depends on this trait, so tests can swap in a seeded
/// or constant source without touching global state.
pub trait RandomSource {
    /// Next sample from `N(0, 1)`.
    fn standard_normal(&mut self) -> f64;
}

/// [`StdRng`]-backed source, seeded from the OS or from a fixed value.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Always returns the same value. Handy for pinning Gaussian output in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRandom(pub f64);

impl RandomSource for ConstantRandom {
    fn standard_normal(&mut self) -> f64 {
        self.0
    }
}
