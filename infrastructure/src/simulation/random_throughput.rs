//! Random tokens/second samples within a fixed range.

use debate_application::ThroughputSimulator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform samples from an inclusive `[min, max]` range.
pub struct RandomThroughput {
    rng: StdRng,
    min: u64,
    max: u64,
}

impl RandomThroughput {
    /// Entropy-seeded generator. A reversed range is swapped.
    pub fn new(min: u64, max: u64) -> Self {
        Self::with_rng(StdRng::from_entropy(), min, max)
    }

    /// Reproducible generator.
    pub fn seeded(min: u64, max: u64, seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), min, max)
    }

    fn with_rng(rng: StdRng, min: u64, max: u64) -> Self {
        Self {
            rng,
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn range(&self) -> (u64, u64) {
        (self.min, self.max)
    }
}

impl ThroughputSimulator for RandomThroughput {
    fn sample(&mut self) -> Option<u64> {
        Some(self.rng.gen_range(self.min..=self.max))
    }
}
