//! Configuration with builder pattern.
//!
//! [`DependenceConfig`] gathers every constant the ranker, the encoder and the
//! panel selector rely on, plus the random seed, thread count and palette.
//! Defaults reproduce the classic dependence plot behaviour. The builder is
//! generated by `bon` and validated in `build()`.
//!
//! # Example
//!
//! ```
//! use dependence::DependenceConfig;
//!
//! // All defaults
//! let config = DependenceConfig::builder().build().unwrap();
//! assert_eq!(config.subsample_cap, 10_000);
//!
//! // Reproducible subsampling with a smaller cap
//! let config = DependenceConfig::builder()
//!     .subsample_cap(2_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! ```

use std::num::NonZeroUsize;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::encoding::Palette;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("subsample_cap must be at least 1")]
    InvalidSubsampleCap,

    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },

    #[error("percentiles must satisfy 0 <= low <= high <= 100, got low={low}, high={high}")]
    InvalidPercentiles { low: f64, high: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },
}

// =============================================================================
// DependenceConfig
// =============================================================================

/// Configuration for interaction ranking, color encoding and panel selection.
///
/// # Structure
///
/// - **Ranking**: subsample cap, bin sizing, degenerate-feature threshold
/// - **Color encoding**: clip percentiles, category limits, tick nudge
/// - **Panels**: tensor y-range padding, rasterization hint
/// - **Resources**: seed and thread count
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct DependenceConfig {
    // === Ranking ===
    /// Maximum number of instances used for ranking. Default: 10 000.
    #[builder(default = 10_000)]
    pub subsample_cap: usize,

    /// Bin width is `sample_size / bins_per_sample` before clamping. Default: 10.
    #[builder(default = 10)]
    pub bins_per_sample: usize,

    /// Upper clamp on the bin width. Default: 50.
    #[builder(default = 50)]
    pub max_bin_width: usize,

    /// Features whose summed absolute value falls below this score 0. Default: 1e-8.
    #[builder(default = 1e-8)]
    pub degenerate_threshold: f64,

    // === Color encoding ===
    /// Lower clip percentile of the color scale. Default: 5.
    #[builder(default = 5.0)]
    pub low_percentile: f64,

    /// Upper clip percentile of the color scale. Default: 95.
    #[builder(default = 95.0)]
    pub high_percentile: f64,

    /// Integer-valued features with fewer distinct values are categorical. Default: 50.
    #[builder(default = 50)]
    pub max_categories: usize,

    /// Offset applied to the two tick positions of a two-label feature. Default: 0.25.
    #[builder(default = 0.25)]
    pub two_category_nudge: f64,

    /// Most evenly spaced bucket edges built for a categorical feature.
    /// Wider code spans get one bucket per distinct code instead. Default: 1024.
    #[builder(default = 1024)]
    pub max_boundaries: usize,

    // === Panels ===
    /// Padding added on both sides of the shared tensor-mode y-range. Default: 0.02.
    #[builder(default = 0.02)]
    pub y_padding: f64,

    /// Panels with more points than this are flagged for rasterization. Default: 500.
    #[builder(default = 500)]
    pub rasterize_threshold: usize,

    /// Colors handed to the renderer.
    #[builder(default)]
    pub palette: Palette,

    // === Resources ===
    /// Seed for subsampling. `None` draws a fresh seed per call.
    pub seed: Option<u64>,

    /// Threads for the per-feature ranking loop. `None` uses all cores.
    pub n_threads: Option<NonZeroUsize>,
}

impl<S: dependence_config_builder::IsComplete> DependenceConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid:
    /// - `subsample_cap`, `bins_per_sample`, `max_bin_width`, `max_categories` or
    ///   `max_boundaries` is 0
    /// - Percentiles outside `[0, 100]` or `low > high`
    /// - Negative or non-finite threshold, nudge or padding
    pub fn build(self) -> Result<DependenceConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl Default for DependenceConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

impl DependenceConfig {
    /// Validate the configuration.
    ///
    /// `build()` runs this. Deserialized configs and struct literals skip the
    /// builder, so the ranker, the encoder and the panel selector run it again
    /// before using a config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subsample_cap == 0 {
            return Err(ConfigError::InvalidSubsampleCap);
        }

        for (field, value) in [
            ("bins_per_sample", self.bins_per_sample),
            ("max_bin_width", self.max_bin_width),
            ("max_categories", self.max_categories),
            ("max_boundaries", self.max_boundaries),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCount { field });
            }
        }

        let (low, high) = (self.low_percentile, self.high_percentile);
        if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) || low > high {
            return Err(ConfigError::InvalidPercentiles { low, high });
        }

        for (field, value) in [
            ("degenerate_threshold", self.degenerate_threshold),
            ("two_category_nudge", self.two_category_nudge),
            ("y_padding", self.y_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { field, value });
            }
        }

        Ok(())
    }

    /// Thread count in `run_with_threads` semantics (0 = auto).
    #[inline]
    pub fn thread_count(&self) -> usize {
        self.n_threads.map_or(0, NonZeroUsize::get)
    }
}
