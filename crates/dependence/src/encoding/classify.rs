//! Continuous vs. categorical classification of a color feature.

use ndarray::ArrayView1;
use serde::Serialize;

use crate::config::DependenceConfig;
use crate::data::DisplayValues;
use crate::error::{DependenceError, Result};
use crate::stats::{distinct_count, percentile_bounds};

/// How a feature's values are treated on a color channel.
///
/// Computed once per feature and threaded through [`ColorEncoder`](super::ColorEncoder)
/// and [`PanelSpec`](crate::PanelSpec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeatureClassification {
    /// Smooth gradient between the clip bounds.
    Continuous,
    /// Low-cardinality integer codes; one color bucket per integer.
    IntegerCategorical,
    /// String labels backed by numeric codes.
    StringCategorical,
}

impl FeatureClassification {
    #[inline]
    pub fn is_categorical(self) -> bool {
        !matches!(self, FeatureClassification::Continuous)
    }
}

/// Classifies features as continuous, integer-categorical or string-categorical.
#[derive(Debug, Clone, Copy)]
pub struct CategoricalDetector<'c> {
    config: &'c DependenceConfig,
}

impl<'c> CategoricalDetector<'c> {
    pub fn new(config: &'c DependenceConfig) -> Self {
        Self { config }
    }

    /// Classify one feature.
    ///
    /// - String display values: [`StringCategorical`](FeatureClassification::StringCategorical)
    /// - Integer low/high percentiles and fewer than `max_categories` distinct
    ///   raw values: [`IntegerCategorical`](FeatureClassification::IntegerCategorical)
    /// - Otherwise, or with fewer than 2 finite values:
    ///   [`Continuous`](FeatureClassification::Continuous)
    ///
    /// # Errors
    ///
    /// [`DependenceError::ShapeMismatch`] if `raw` and `display` differ in length.
    pub fn classify(
        &self,
        raw: ArrayView1<'_, f64>,
        display: DisplayValues<'_>,
    ) -> Result<FeatureClassification> {
        self.config.validate()?;
        if raw.len() != display.len() {
            return Err(DependenceError::shape("display values", &[raw.len()], &[display.len()]));
        }

        if display.labels().is_some() {
            return Ok(FeatureClassification::StringCategorical);
        }

        let (low, high, n_finite) = percentile_bounds(
            raw.iter().copied(),
            self.config.low_percentile,
            self.config.high_percentile,
        );
        if n_finite < 2 {
            return Ok(FeatureClassification::Continuous);
        }

        if low.fract() == 0.0
            && high.fract() == 0.0
            && distinct_count(raw.iter().copied()) < self.config.max_categories
        {
            Ok(FeatureClassification::IntegerCategorical)
        } else {
            Ok(FeatureClassification::Continuous)
        }
    }
}

/// Classify with the default configuration. See [`CategoricalDetector::classify`].
pub fn classify(raw: ArrayView1<'_, f64>, display: DisplayValues<'_>) -> Result<FeatureClassification> {
    CategoricalDetector::new(&DependenceConfig::default()).classify(raw, display)
}
