//! Windowed-correlation interaction estimator.
//!
//! Orders the other features by how much they seem to interact with a
//! target feature. Instances are sorted by the target's raw value and cut
//! into consecutive windows; inside each window the target's attribution is
//! correlated with the other feature's raw value. A feature's score is the
//! sum of absolute per-window correlations.
//!
//! This is an approximation. It does not compute Shapley interaction indices;
//! use an interaction tensor with [`PanelSelector`](crate::PanelSelector) for those.

use ndarray::ArrayView2;

use super::InstanceSampler;
use crate::config::DependenceConfig;
use crate::data::{Attributions, FeatureMatrix};
use crate::error::Result;
use crate::stats::{pearson, std_dev};
use crate::utils::run_with_threads;

/// Interaction strength of one feature with the target.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct InteractionScore {
    /// Ordinal of the other feature.
    pub feature: usize,
    /// Sum of absolute windowed correlations. Finite and non-negative.
    pub score: f64,
}

/// Ranks features by approximate interaction strength with a target.
#[derive(Debug, Clone, Copy)]
pub struct InteractionRanker<'c> {
    config: &'c DependenceConfig,
}

impl<'c> InteractionRanker<'c> {
    pub fn new(config: &'c DependenceConfig) -> Self {
        Self { config }
    }

    /// Window size for a sample of `sample_size` instances.
    ///
    /// `sample_size / bins_per_sample`, clamped to `[1, max_bin_width]`.
    #[inline]
    pub fn bin_width(&self, sample_size: usize) -> usize {
        let divisor = self.config.bins_per_sample.max(1);
        (sample_size / divisor).clamp(1, self.config.max_bin_width.max(1))
    }

    /// Rank every feature except `target` by descending interaction score.
    ///
    /// Ties keep ascending feature order.
    ///
    /// # Errors
    ///
    /// - [`ShapeMismatch`](crate::DependenceError::ShapeMismatch) if
    ///   `attributions` is not `[n_samples, n_features]` of `features`
    /// - [`IndexOutOfRange`](crate::DependenceError::IndexOutOfRange) if
    ///   `target` is not a feature
    /// - [`InvalidConfig`](crate::DependenceError::InvalidConfig) if the
    ///   config fails [`DependenceConfig::validate`]
    pub fn rank(
        &self,
        target: usize,
        features: FeatureMatrix<'_>,
        attributions: ArrayView2<'_, f64>,
    ) -> Result<Vec<InteractionScore>> {
        self.config.validate()?;
        Attributions::Matrix(attributions).check_aligned(&features)?;
        features.check_feature(target)?;

        let scores = self.scores(target, features, attributions);
        let mut ranked: Vec<InteractionScore> = scores
            .into_iter()
            .enumerate()
            .filter(|&(feature, _)| feature != target)
            .map(|(feature, score)| InteractionScore { feature, score })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(ranked)
    }

    /// Raw score for every feature, indexed by feature. The target's slot is 0.
    ///
    /// Inputs must already be validated.
    fn scores(
        &self,
        target: usize,
        features: FeatureMatrix<'_>,
        attributions: ArrayView2<'_, f64>,
    ) -> Vec<f64> {
        let mut order = InstanceSampler::from_config(self.config).sample(features.n_samples());
        order.sort_by(|&a, &b| features.get(a, target).total_cmp(&features.get(b, target)));

        let reference: Vec<f64> = order.iter().map(|&i| attributions[[i, target]]).collect();
        let width = self.bin_width(order.len());
        let threshold = self.config.degenerate_threshold;
        tracing::debug!(target, sample_size = order.len(), width, "ranking interactions");

        let n_features = features.n_features();
        run_with_threads(self.config.thread_count(), |parallelism| {
            parallelism.maybe_par_map(0..n_features, |feature| {
                if feature == target {
                    return 0.0;
                }
                let column = features.feature(feature);
                let values: Vec<f64> = order.iter().map(|&i| column[i]).collect();
                if values.iter().map(|v| v.abs()).sum::<f64>() < threshold {
                    tracing::trace!(feature, "degenerate feature scored 0");
                    return 0.0;
                }
                windowed_correlation(&reference, &values, width)
            })
        })
    }
}

/// Sum of `|pearson(reference, values)|` over consecutive windows of `width`.
///
/// Windows where either side has zero standard deviation contribute 0. The
/// last window may be shorter than `width`.
pub fn windowed_correlation(reference: &[f64], values: &[f64], width: usize) -> f64 {
    debug_assert_eq!(reference.len(), values.len());
    reference
        .chunks(width.max(1))
        .zip(values.chunks(width.max(1)))
        .map(|(r, v)| {
            if std_dev(v) > 0.0 && std_dev(r) > 0.0 {
                let c = pearson(r, v).abs();
                if c.is_finite() { c } else { 0.0 }
            } else {
                0.0
            }
        })
        .sum()
}

/// Rank with the default configuration. See [`InteractionRanker::rank`].
pub fn rank(
    target: usize,
    features: FeatureMatrix<'_>,
    attributions: ArrayView2<'_, f64>,
) -> Result<Vec<InteractionScore>> {
    InteractionRanker::new(&DependenceConfig::default()).rank(target, features, attributions)
}
