//! Panel selection for matrix and tensor attributions.
//!
//! # Modes
//!
//! - **Matrix mode** ([`Target::Single`] with [`Attributions::Matrix`]): the
//!   y values are the target's own attribution column. With
//!   [`Coloring::Auto`] the color features are the top ranked interactions.
//! - **Tensor mode** ([`Target::Pair`] with [`Attributions::Tensor`]): the
//!   order comes from summed `|tensor[:, target, j]|`, with the target's
//!   main effect always first. Off-diagonal effects are doubled, since the
//!   tensor splits each pairwise effect between the two features, and every
//!   panel shares one y range.

use ndarray::{ArrayView2, ArrayView3, Axis};

use super::{PanelKind, PanelSpec, YRange};
use crate::config::DependenceConfig;
use crate::data::{
    Attributions, DisplayColumn, DisplayMatrix, DisplayValues, FeatureId, FeatureMatrix,
    FeatureNames,
};
use crate::encoding::{CategoricalDetector, ColorEncoder, category_ticks};
use crate::error::{DependenceError, Result};
use crate::interaction::InteractionRanker;

// =============================================================================
// Requests
// =============================================================================

/// The feature to plot, and which attribution mode applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One feature; requires an attribution matrix.
    Single(FeatureId),
    /// A feature pair; requires an interaction tensor. The first element is
    /// the plotted feature.
    Pair(FeatureId, FeatureId),
}

impl Target {
    pub fn single(id: impl Into<FeatureId>) -> Self {
        Target::Single(id.into())
    }

    pub fn pair(first: impl Into<FeatureId>, second: impl Into<FeatureId>) -> Self {
        Target::Pair(first.into(), second.into())
    }
}

/// How the color feature of each panel is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Coloring {
    /// Strongest interactions first.
    #[default]
    Auto,
    /// No color feature.
    None,
    /// This feature, without ranking.
    Feature(FeatureId),
}

// =============================================================================
// PanelData
// =============================================================================

/// Validated inputs for panel selection.
#[derive(Debug, Clone, Copy)]
pub struct PanelData<'a> {
    features: FeatureMatrix<'a>,
    attributions: Attributions<'a>,
    display: Option<&'a DisplayMatrix>,
    names: Option<&'a FeatureNames>,
}

impl<'a> PanelData<'a> {
    /// # Errors
    ///
    /// [`DependenceError::ShapeMismatch`] if `attributions` is not aligned
    /// with `features`.
    pub fn new(features: FeatureMatrix<'a>, attributions: Attributions<'a>) -> Result<Self> {
        attributions.check_aligned(&features)?;
        Ok(Self { features, attributions, display: None, names: None })
    }

    /// Attach display values. Without them the raw values are displayed.
    pub fn with_display(mut self, display: &'a DisplayMatrix) -> Result<Self> {
        display.check_aligned(&self.features)?;
        self.display = Some(display);
        Ok(self)
    }

    /// Attach feature names. Without them names are `"Feature {i}"`.
    pub fn with_names(mut self, names: &'a FeatureNames) -> Result<Self> {
        let m = self.features.n_features();
        if names.len() != m {
            return Err(DependenceError::shape("feature names", &[m], &[names.len()]));
        }
        self.names = Some(names);
        Ok(self)
    }

    pub fn features(&self) -> FeatureMatrix<'a> {
        self.features
    }

    pub fn attributions(&self) -> Attributions<'a> {
        self.attributions
    }

    /// Resolve `id` to a feature ordinal and check its range.
    pub fn resolve(&self, id: &FeatureId) -> Result<usize> {
        let index = match (id, self.names) {
            (_, Some(names)) => names.resolve(id)?,
            (FeatureId::Index(i), None) => *i,
            (FeatureId::Name(_), None) => {
                FeatureNames::default_for(self.features.n_features()).resolve(id)?
            }
        };
        self.features.check_feature(index)?;
        Ok(index)
    }

    /// Display values of `feature`, falling back to its raw values.
    pub fn display_values(&self, feature: usize) -> DisplayValues<'a> {
        self.display
            .and_then(|d| d.column(feature))
            .map(DisplayColumn::values)
            .unwrap_or_else(|| DisplayValues::Numeric(self.features.feature(feature)))
    }
}

// =============================================================================
// PanelSelector
// =============================================================================

/// Chooses which panels to show and builds their [`PanelSpec`]s.
#[derive(Debug, Clone, Copy)]
pub struct PanelSelector<'c> {
    config: &'c DependenceConfig,
}

impl<'c> PanelSelector<'c> {
    pub fn new(config: &'c DependenceConfig) -> Self {
        Self { config }
    }

    /// Select up to `count` panels for `target`.
    ///
    /// `count` is reduced to the number of candidates without error: the
    /// other features in matrix mode, all features in tensor mode, and one
    /// panel for [`Coloring::None`] or [`Coloring::Feature`].
    ///
    /// # Errors
    ///
    /// - [`DependenceError::NotFound`] / [`DependenceError::IndexOutOfRange`]
    ///   for unresolvable feature identifiers
    /// - [`DependenceError::InvalidMode`] if the target kind does not match
    ///   the attribution kind, or a tensor is combined with non-auto coloring
    /// - [`DependenceError::InconsistentCategory`] from color encoding
    /// - [`DependenceError::InvalidConfig`] if the config fails
    ///   [`DependenceConfig::validate`]
    pub fn select_panels(
        &self,
        target: &Target,
        coloring: &Coloring,
        count: usize,
        data: &PanelData<'_>,
    ) -> Result<Vec<PanelSpec>> {
        self.config.validate()?;
        match (target, data.attributions) {
            (Target::Single(id), Attributions::Matrix(shap)) => {
                let target = data.resolve(id)?;
                self.matrix_panels(target, coloring, count, data, shap)
            }
            (Target::Pair(first, second), Attributions::Tensor(tensor)) => {
                if *coloring != Coloring::Auto {
                    return Err(DependenceError::InvalidMode(
                        "interaction tensors choose their own color features",
                    ));
                }
                let target = data.resolve(first)?;
                data.resolve(second)?;
                self.tensor_panels(target, count, data, tensor)
            }
            (Target::Single(_), Attributions::Tensor(_)) => Err(DependenceError::InvalidMode(
                "an interaction tensor needs a feature pair as target",
            )),
            (Target::Pair(..), Attributions::Matrix(_)) => Err(DependenceError::InvalidMode(
                "a feature pair target needs an interaction tensor",
            )),
        }
    }

    fn matrix_panels(
        &self,
        target: usize,
        coloring: &Coloring,
        count: usize,
        data: &PanelData<'_>,
        shap: ArrayView2<'_, f64>,
    ) -> Result<Vec<PanelSpec>> {
        tracing::debug!(target, count, ?coloring, "selecting matrix-mode panels");
        let y = shap.column(target).to_vec();

        let candidates: Vec<(Option<usize>, Option<f64>)> = match coloring {
            Coloring::Auto => {
                let ranked = InteractionRanker::new(self.config).rank(target, data.features, shap)?;
                if ranked.is_empty() {
                    vec![(None, None)]
                } else {
                    ranked.iter().map(|s| (Some(s.feature), Some(s.score))).collect()
                }
            }
            Coloring::None => vec![(None, None)],
            Coloring::Feature(id) => vec![(Some(data.resolve(id)?), None)],
        };

        let count = clamp_count(count, candidates.len());
        candidates[..count]
            .iter()
            .map(|&(color, score)| {
                self.build_panel(PanelKind::Dependence, target, color, score, y.clone(), None, data)
            })
            .collect()
    }

    fn tensor_panels(
        &self,
        target: usize,
        count: usize,
        data: &PanelData<'_>,
        tensor: ArrayView3<'_, f64>,
    ) -> Result<Vec<PanelSpec>> {
        // effects[[i, j]] = tensor[i, target, j]
        let effects = tensor.index_axis(Axis(1), target);
        let n_features = effects.ncols();

        let strengths: Vec<f64> = (0..n_features)
            .map(|j| effects.column(j).iter().map(|v| v.abs()).sum())
            .collect();

        let mut order: Vec<usize> = (0..n_features).collect();
        order.sort_by(|&a, &b| strengths[b].total_cmp(&strengths[a]));
        if order.first() != Some(&target) {
            order.retain(|&j| j != target);
            order.insert(0, target);
        }

        let count = clamp_count(count, n_features);
        let selected = &order[..count];
        let y_range = self.shared_y_range(effects, selected);
        tracing::debug!(target, count, ?selected, ?y_range, "selecting tensor-mode panels");

        selected
            .iter()
            .map(|&j| {
                let (kind, y) = if j == target {
                    (PanelKind::MainEffect, effects.column(j).to_vec())
                } else {
                    (PanelKind::InteractionEffect, effects.column(j).mapv(|v| v * 2.0).to_vec())
                };
                self.build_panel(kind, target, Some(j), Some(strengths[j]), y, y_range, data)
            })
            .collect()
    }

    /// Twice the extremes of the selected effect columns, padded.
    fn shared_y_range(&self, effects: ArrayView2<'_, f64>, selected: &[usize]) -> Option<YRange> {
        let (lo, hi) = selected
            .iter()
            .flat_map(|&j| effects.column(j).into_iter().copied())
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        (lo <= hi).then(|| YRange {
            min: 2.0 * lo - self.config.y_padding,
            max: 2.0 * hi + self.config.y_padding,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_panel(
        &self,
        kind: PanelKind,
        target: usize,
        color_feature: Option<usize>,
        interaction_score: Option<f64>,
        y: Vec<f64>,
        y_range: Option<YRange>,
        data: &PanelData<'_>,
    ) -> Result<PanelSpec> {
        let target_raw = data.features.feature(target);
        let x_ticks = match data.display_values(target).labels() {
            Some(labels) => Some(category_ticks(target_raw, labels)?),
            None => None,
        };

        let (classification, color, color_values) = match color_feature {
            Some(feature) => {
                let raw = data.features.feature(feature);
                let display = data.display_values(feature);
                let class = CategoricalDetector::new(self.config).classify(raw, display)?;
                let spec = ColorEncoder::new(self.config).encode(class, raw, display)?;
                (Some(class), Some(spec), Some(raw.to_vec()))
            }
            None => (None, None, None),
        };

        let x = target_raw.to_vec();
        Ok(PanelSpec {
            kind,
            target,
            color_feature,
            interaction_score,
            classification,
            color,
            x_ticks,
            y,
            color_values,
            y_range,
            show_colorbar: color_feature.is_some_and(|f| f != target),
            colorbar_tick_marks: !classification.is_some_and(|c| c.is_categorical()),
            rasterize: x.len() > self.config.rasterize_threshold,
            palette: self.config.palette,
            x,
        })
    }
}

fn clamp_count(requested: usize, available: usize) -> usize {
    if requested > available {
        tracing::debug!(requested, available, "reducing panel count");
        available
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::FeatureClassification;
    use crate::testing::{interaction_fixture, interaction_tensor_fixture};
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, Array3, array};

    fn seeded() -> DependenceConfig {
        DependenceConfig::builder().seed(5).build().unwrap()
    }

    #[test]
    fn matrix_auto_uses_ranking() {
        let (features, shap) = interaction_fixture(400, 2);
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Matrix(shap.view()),
        )
        .unwrap();

        let panels = PanelSelector::new(&config)
            .select_panels(&Target::single(0usize), &Coloring::Auto, 2, &data)
            .unwrap();

        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].color_feature, Some(1));
        assert_eq!(panels[1].color_feature, Some(2));
        assert!(panels[0].interaction_score >= panels[1].interaction_score);
        for panel in &panels {
            assert_eq!(panel.kind, PanelKind::Dependence);
            assert_eq!(panel.y, shap.column(0).to_vec());
            assert_eq!(panel.x, features.column(0).to_vec());
            assert!(panel.y_range.is_none());
            assert!(panel.show_colorbar);
        }
        assert_eq!(panels[0].classification, Some(FeatureClassification::IntegerCategorical));
        assert!(!panels[0].colorbar_tick_marks);
        assert_eq!(panels[1].classification, Some(FeatureClassification::Continuous));
        assert!(panels[1].colorbar_tick_marks);
    }

    #[test]
    fn matrix_count_is_clamped() {
        let (features, shap) = interaction_fixture(50, 2);
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Matrix(shap.view()),
        )
        .unwrap();
        let selector = PanelSelector::new(&config);

        let panels = selector.select_panels(&Target::single(0usize), &Coloring::Auto, 10, &data).unwrap();
        assert_eq!(panels.len(), 2);

        let panels = selector.select_panels(&Target::single(0usize), &Coloring::Auto, 0, &data).unwrap();
        assert!(panels.is_empty());
    }

    #[test]
    fn explicit_and_no_coloring() {
        let (features, shap) = interaction_fixture(50, 2);
        let config = seeded();
        let names: FeatureNames = ["x", "flag", "noise"].into_iter().collect();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Matrix(shap.view()),
        )
        .unwrap()
        .with_names(&names)
        .unwrap();
        let selector = PanelSelector::new(&config);

        let explicit = Coloring::Feature("noise".into());
        let panels = selector.select_panels(&Target::single("x"), &explicit, 3, &data).unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].color_feature, Some(2));
        assert_eq!(panels[0].interaction_score, None);

        let panels = selector.select_panels(&Target::single(0usize), &Coloring::None, 1, &data).unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].color_feature, None);
        assert!(panels[0].color.is_none());
        assert!(!panels[0].show_colorbar);
        assert!(panels[0].point_colors().iter().all(|&c| c == config.palette.primary));

        let own = Coloring::Feature(FeatureId::Index(0));
        let panels = selector.select_panels(&Target::single(0usize), &own, 1, &data).unwrap();
        assert!(!panels[0].show_colorbar, "coloring by the target itself hides the colorbar");
    }

    #[test]
    fn unknown_name_is_reported() {
        let (features, shap) = interaction_fixture(20, 2);
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Matrix(shap.view()),
        )
        .unwrap();

        let err = PanelSelector::new(&config)
            .select_panels(&Target::single("age"), &Coloring::Auto, 1, &data)
            .unwrap_err();
        assert_eq!(err, DependenceError::NotFound { name: "age".into() });

        // Default names resolve without an explicit name table.
        let panels = PanelSelector::new(&config)
            .select_panels(&Target::single("Feature 0"), &Coloring::Auto, 1, &data)
            .unwrap();
        assert_eq!(panels[0].target, 0);
    }

    #[test]
    fn mode_mismatch_is_rejected() {
        let features = Array2::<f64>::zeros((4, 2));
        let shap = Array2::<f64>::zeros((4, 2));
        let tensor = Array3::<f64>::zeros((4, 2, 2));
        let config = seeded();
        let selector = PanelSelector::new(&config);
        let fm = FeatureMatrix::new(features.view());

        let matrix = PanelData::new(fm, Attributions::Matrix(shap.view())).unwrap();
        let err = selector.select_panels(&Target::pair(0usize, 1usize), &Coloring::Auto, 1, &matrix).unwrap_err();
        assert!(matches!(err, DependenceError::InvalidMode(_)));

        let tensor = PanelData::new(fm, Attributions::Tensor(tensor.view())).unwrap();
        let err = selector.select_panels(&Target::single(0usize), &Coloring::Auto, 1, &tensor).unwrap_err();
        assert!(matches!(err, DependenceError::InvalidMode(_)));

        let err = selector
            .select_panels(&Target::pair(0usize, 1usize), &Coloring::None, 1, &tensor)
            .unwrap_err();
        assert!(matches!(err, DependenceError::InvalidMode(_)));
    }

    #[test]
    fn tensor_main_effect_first() {
        let (features, tensor) = interaction_tensor_fixture(200, 9);
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Tensor(tensor.view()),
        )
        .unwrap();

        let panels = PanelSelector::new(&config)
            .select_panels(&Target::pair(0usize, 0usize), &Coloring::Auto, 3, &data)
            .unwrap();

        let order: Vec<_> = panels.iter().map(|p| p.color_feature).collect();
        assert_eq!(order, vec![Some(0), Some(2), Some(1)]);
        assert_eq!(panels[0].kind, PanelKind::MainEffect);
        assert_eq!(panels[1].kind, PanelKind::InteractionEffect);
        assert!(!panels[0].show_colorbar);
        assert!(panels[1].show_colorbar);
        // Main effect's summed strength is the smallest, yet it comes first.
        assert!(panels[0].interaction_score < panels[1].interaction_score);
    }

    #[test]
    fn tensor_values_and_shared_range() {
        let (features, tensor) = interaction_tensor_fixture(100, 4);
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Tensor(tensor.view()),
        )
        .unwrap();

        let panels = PanelSelector::new(&config)
            .select_panels(&Target::pair(0usize, 1usize), &Coloring::Auto, 2, &data)
            .unwrap();
        assert_eq!(panels.len(), 2);

        for i in 0..100 {
            assert_eq!(panels[0].y[i], tensor[[i, 0, 0]]);
            assert_eq!(panels[1].y[i], tensor[[i, 0, 2]] * 2.0);
        }

        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for j in [0, 2] {
            for i in 0..100 {
                lo = lo.min(tensor[[i, 0, j]]);
                hi = hi.max(tensor[[i, 0, j]]);
            }
        }
        let range = panels[0].y_range.unwrap();
        assert_abs_diff_eq!(range.min, 2.0 * lo - 0.02);
        assert_abs_diff_eq!(range.max, 2.0 * hi + 0.02);
        assert_eq!(panels[1].y_range, Some(range));
    }

    #[test]
    fn tensor_count_is_clamped_to_all_features() {
        let (features, tensor) = interaction_tensor_fixture(30, 4);
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Tensor(tensor.view()),
        )
        .unwrap();

        let panels = PanelSelector::new(&config)
            .select_panels(&Target::pair(1usize, 0usize), &Coloring::Auto, 9, &data)
            .unwrap();
        assert_eq!(panels.len(), 3);
        assert_eq!(panels[0].color_feature, Some(1));
    }

    #[test]
    fn string_target_gets_x_ticks() {
        let features = array![[0.0, 1.0], [1.0, 2.0], [0.0, 3.0], [1.0, 4.0]];
        let shap = array![[0.1, 0.0], [0.2, 0.0], [-0.1, 0.5], [-0.2, 0.5]];
        let display = DisplayMatrix::new(vec![
            DisplayColumn::Text(vec!["b".into(), "a".into(), "b".into(), "a".into()]),
            DisplayColumn::Numeric(vec![1.0, 2.0, 3.0, 4.0]),
        ]);
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Matrix(shap.view()),
        )
        .unwrap()
        .with_display(&display)
        .unwrap();

        let panels = PanelSelector::new(&config)
            .select_panels(&Target::single(0usize), &Coloring::Auto, 1, &data)
            .unwrap();
        let ticks = panels[0].x_ticks.as_ref().unwrap();
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert_eq!(ticks[0].position, 0.0);
        assert_eq!(ticks[1].position, 1.0);
    }

    #[test]
    fn single_feature_matrix_has_uncolored_panel() {
        let features = array![[1.0], [2.0], [3.0]];
        let shap = array![[0.1], [0.2], [0.3]];
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Matrix(shap.view()),
        )
        .unwrap();

        let panels = PanelSelector::new(&config)
            .select_panels(&Target::single(0usize), &Coloring::Auto, 1, &data)
            .unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].color_feature, None);
    }

    #[test]
    fn rasterize_above_threshold() {
        let (features, shap) = interaction_fixture(600, 1);
        let config = seeded();
        let data = PanelData::new(
            FeatureMatrix::new(features.view()),
            Attributions::Matrix(shap.view()),
        )
        .unwrap();
        let panels = PanelSelector::new(&config)
            .select_panels(&Target::single(0usize), &Coloring::Auto, 1, &data)
            .unwrap();
        assert!(panels[0].rasterize);
        assert_eq!(panels[0].n_points(), 600);
    }

    #[test]
    fn names_must_match_feature_count() {
        let features = Array2::<f64>::zeros((3, 2));
        let shap = Array2::<f64>::zeros((3, 2));
        let names = FeatureNames::default_for(3);
        let err = PanelData::new(FeatureMatrix::new(features.view()), Attributions::Matrix(shap.view()))
            .unwrap()
            .with_names(&names)
            .unwrap_err();
        assert!(matches!(err, DependenceError::ShapeMismatch { .. }));
    }
}
