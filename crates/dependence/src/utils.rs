//! Thread pool plumbing for the interaction ranker.
//!
//! Each candidate feature is scored independently, so the ranker maps its
//! scoring closure with [`Parallelism::maybe_par_map`] inside a pool set up
//! by [`run_with_threads`].

use rayon::prelude::*;

// =============================================================================
// Scoring Mode
// =============================================================================

/// How the ranker walks its candidate features.
///
/// `Parallel` scores features on the current rayon pool; `Sequential` scores
/// them in order on the calling thread. Scores are identical either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Mode for a configured thread count (see [`DependenceConfig::thread_count`]).
    ///
    /// `1` scores on the calling thread. `0` follows the global rayon pool,
    /// which is sequential on single-core machines.
    ///
    /// [`DependenceConfig::thread_count`]: crate::DependenceConfig::thread_count
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if features are scored on the pool.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Score every item of `iter`. The result is indexed like the input, so a
    /// feature's score lands in its own slot in both modes.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Pool Setup
// =============================================================================

/// Run `f` inside a rayon pool sized from `n_threads`.
///
/// `n_threads` comes from [`DependenceConfig::thread_count`]: `0` sizes the
/// pool to the available cores, `1` skips the pool. If the pool cannot be
/// built, `f` runs sequentially and a debug event is logged.
///
/// [`DependenceConfig::thread_count`]: crate::DependenceConfig::thread_count
#[inline]
pub fn run_with_threads<T: Send>(n_threads: usize, f: impl FnOnce(Parallelism) -> T + Send) -> T {
    match Parallelism::from_threads(n_threads) {
        Parallelism::Sequential => f(Parallelism::Sequential),
        Parallelism::Parallel => {
            match rayon::ThreadPoolBuilder::new().num_threads(n_threads).build() {
                Ok(pool) => pool.install(|| f(Parallelism::Parallel)),
                Err(err) => {
                    tracing::debug!(%err, "thread pool unavailable, running sequentially");
                    f(Parallelism::Sequential)
                }
            }
        }
    }
}
