//! Color channel encoding: clip bounds, discretization and ticks.

use std::collections::HashMap;

use ndarray::ArrayView1;
use serde::Serialize;

use super::FeatureClassification;
use crate::config::DependenceConfig;
use crate::data::DisplayValues;
use crate::error::{DependenceError, Result};
use crate::stats::{linspace, percentile_bounds, same_value};

/// A labeled position on a scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// How one feature's raw values map onto the color scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSpec {
    /// Lower clip bound (low percentile). Always `<= high`.
    pub low: f64,
    /// Upper clip bound (high percentile).
    pub high: f64,
    /// Bucket edges for categorical features with `low != high`.
    pub boundaries: Option<Vec<f64>>,
    /// Colorbar ticks for string-labeled features.
    pub ticks: Option<Vec<Tick>>,
}

impl ColorSpec {
    /// Returns true if values map to discrete buckets.
    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.boundaries.is_some()
    }

    /// Number of color buckets, if discrete.
    pub fn n_buckets(&self) -> Option<usize> {
        self.boundaries.as_ref().map(|b| b.len().saturating_sub(1))
    }

    /// Bucket of `value`, if discrete and finite.
    ///
    /// Values below the first edge fall in the first bucket, values at or
    /// above the last edge in the last bucket.
    pub fn bucket(&self, value: f64) -> Option<usize> {
        let bounds = self.boundaries.as_ref()?;
        if !value.is_finite() || bounds.len() < 2 {
            return None;
        }
        let above = bounds.partition_point(|&b| b <= value);
        Some(above.saturating_sub(1).min(bounds.len() - 2))
    }

    /// Position of `value` on the scale in `[0, 1]`. NaN for missing values.
    ///
    /// Continuous features are clipped to `[low, high]` and scaled linearly;
    /// discrete features map their bucket evenly onto the scale.
    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        if let (Some(bucket), Some(n)) = (self.bucket(value), self.n_buckets()) {
            return if n > 1 { bucket as f64 / (n - 1) as f64 } else { 0.5 };
        }
        if self.high > self.low {
            ((value - self.low) / (self.high - self.low)).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}

/// Builds [`ColorSpec`]s for classified features.
#[derive(Debug, Clone, Copy)]
pub struct ColorEncoder<'c> {
    config: &'c DependenceConfig,
}

impl<'c> ColorEncoder<'c> {
    pub fn new(config: &'c DependenceConfig) -> Self {
        Self { config }
    }

    /// Encode one feature as a color channel.
    ///
    /// # Errors
    ///
    /// - [`DependenceError::ShapeMismatch`] if `raw` and `display` differ in length
    /// - [`DependenceError::InconsistentCategory`] if one display label maps
    ///   to two raw values
    pub fn encode(
        &self,
        classification: FeatureClassification,
        raw: ArrayView1<'_, f64>,
        display: DisplayValues<'_>,
    ) -> Result<ColorSpec> {
        self.config.validate()?;
        if raw.len() != display.len() {
            return Err(DependenceError::shape("display values", &[raw.len()], &[display.len()]));
        }

        let (low, high, _) = percentile_bounds(
            raw.iter().copied(),
            self.config.low_percentile,
            self.config.high_percentile,
        );

        let boundaries = (classification.is_categorical() && low != high)
            .then(|| self.boundaries(raw, low, high));

        let ticks = match (classification, display.labels()) {
            (FeatureClassification::StringCategorical, Some(labels)) => {
                let mut ticks = category_ticks(raw, labels)?;
                if let [first, second] = ticks.as_mut_slice() {
                    first.position -= self.config.two_category_nudge;
                    second.position += self.config.two_category_nudge;
                }
                Some(ticks)
            }
            _ => None,
        };

        Ok(ColorSpec { low, high, boundaries, ticks })
    }

    /// Bucket edges for a categorical feature clipped to `[low, high]`.
    ///
    /// `high - low + 2` evenly spaced edges, one bucket per integer code in
    /// range. Spans needing more than `max_boundaries` edges get one bucket
    /// per distinct code instead, split at the midpoints between codes.
    fn boundaries(&self, raw: ArrayView1<'_, f64>, low: f64, high: f64) -> Vec<f64> {
        let span = high - low + 2.0;
        if span <= self.config.max_boundaries as f64 {
            return linspace(low, high, span as usize);
        }

        let mut codes: Vec<f64> = raw
            .iter()
            .copied()
            .filter(|v| v.is_finite() && (low..=high).contains(v))
            .collect();
        codes.sort_unstable_by(f64::total_cmp);
        codes.dedup();
        tracing::debug!(span, n_codes = codes.len(), "code span too wide, bucketing by distinct code");

        let mut edges = Vec::with_capacity(codes.len() + 1);
        edges.push(low);
        edges.extend(codes.windows(2).map(|w| w[0] + (w[1] - w[0]) / 2.0));
        edges.push(high);
        edges
    }
}

/// One tick per distinct label, at the label's raw value, in first-seen order.
///
/// # Errors
///
/// [`DependenceError::InconsistentCategory`] if a label appears with two raw values.
pub fn category_ticks(raw: ArrayView1<'_, f64>, labels: &[String]) -> Result<Vec<Tick>> {
    let mut ticks: Vec<Tick> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (&value, label) in raw.iter().zip(labels) {
        match seen.get(label.as_str()) {
            Some(&i) if !same_value(ticks[i].position, value) => {
                return Err(DependenceError::InconsistentCategory {
                    label: label.clone(),
                    first: ticks[i].position,
                    second: value,
                });
            }
            Some(_) => {}
            None => {
                seen.insert(label, ticks.len());
                ticks.push(Tick { position: value, label: label.clone() });
            }
        }
    }
    Ok(ticks)
}

/// Encode with the default configuration. See [`ColorEncoder::encode`].
pub fn encode(
    classification: FeatureClassification,
    raw: ArrayView1<'_, f64>,
    display: DisplayValues<'_>,
) -> Result<ColorSpec> {
    ColorEncoder::new(&DependenceConfig::default()).encode(classification, raw, display)
}
