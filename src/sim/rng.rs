//! Seeded random source
//!
//! One `Pcg32` stream per round. The seed is kept alongside the generator so a
//! round can be replayed exactly.

use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution};
use rand_pcg::Pcg32;

/// Deterministic random source for one round
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: Pcg32,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from system entropy
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[min, max]` (bounds may be given in either order)
    pub fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(lo..=hi)
    }

    /// Sample from Binomial(trials, p); `p` is clamped to `[0, 1]`
    pub fn binomial(&mut self, trials: u32, p: f64) -> u32 {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        match Binomial::new(u64::from(trials), p) {
            Ok(dist) => dist.sample(&mut self.rng) as u32,
            Err(_) => 0,
        }
    }
}

/// Fresh seed from the thread-local OS-seeded generator
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}
