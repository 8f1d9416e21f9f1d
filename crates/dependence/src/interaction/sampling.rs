//! Instance subsampling for the interaction ranker.
//!
//! Above the cap, a uniform sample without replacement is drawn with a
//! partial Fisher-Yates shuffle. With no seed configured every call draws a
//! fresh seed, so repeated calls on large inputs differ; set a seed for
//! reproducible rankings.

use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::DependenceConfig;

/// Draws the instance indices used for ranking.
#[derive(Debug, Clone, Copy)]
pub struct InstanceSampler {
    /// Maximum number of instances kept.
    pub cap: usize,
    /// Random seed. `None` = fresh seed per call.
    pub seed: Option<u64>,
}

impl InstanceSampler {
    pub fn new(cap: usize, seed: Option<u64>) -> Self {
        Self { cap, seed }
    }

    pub fn from_config(config: &DependenceConfig) -> Self {
        Self::new(config.subsample_cap, config.seed)
    }

    /// Returns true if `n_samples` instances would be subsampled.
    #[inline]
    pub fn is_enabled(&self, n_samples: usize) -> bool {
        n_samples > self.cap
    }

    /// Indices of the instances to use, sorted ascending.
    ///
    /// All of `0..n_samples` when `n_samples <= cap`, otherwise exactly `cap`
    /// distinct indices.
    pub fn sample(&self, n_samples: usize) -> Vec<usize> {
        if !self.is_enabled(n_samples) {
            return (0..n_samples).collect();
        }

        let seed = self.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        tracing::debug!(n_samples, cap = self.cap, seed, "subsampling instances");

        // Sample without replacement using partial Fisher-Yates shuffle
        let mut indices: Vec<usize> = (0..n_samples).collect();
        for i in 0..self.cap {
            let j = rng.gen_range(i..n_samples);
            indices.swap(i, j);
        }

        indices.truncate(self.cap);
        indices.sort_unstable();
        indices
    }
}
