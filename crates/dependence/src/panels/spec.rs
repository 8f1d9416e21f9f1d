//! The panel description handed to the renderer.

use serde::Serialize;

use crate::encoding::{ColorSpec, FeatureClassification, Palette, Rgb, Tick};

/// What a panel's y values represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PanelKind {
    /// Target attribution against target value (matrix mode).
    Dependence,
    /// Diagonal of the interaction tensor for the target (tensor mode).
    MainEffect,
    /// Full pairwise effect of the target with the color feature (tensor mode).
    InteractionEffect,
}

/// Y-axis range shared by every panel of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YRange {
    pub min: f64,
    pub max: f64,
}

/// One panel: the points to plot and how to color them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSpec {
    pub kind: PanelKind,
    /// Feature on the x axis.
    pub target: usize,
    /// Feature used for the color channel, if any.
    pub color_feature: Option<usize>,
    /// Interaction strength of `color_feature` with the target, when ranked.
    pub interaction_score: Option<f64>,
    /// Classification of the color feature.
    pub classification: Option<FeatureClassification>,
    /// Color scale of the color feature.
    pub color: Option<ColorSpec>,
    /// Raw values of the target feature.
    pub x: Vec<f64>,
    /// Label ticks for the x axis when the target has string display values.
    pub x_ticks: Option<Vec<Tick>>,
    /// Attribution values, possibly rescaled.
    pub y: Vec<f64>,
    /// Raw values of the color feature.
    pub color_values: Option<Vec<f64>>,
    /// Shared y range. `None` lets the renderer fit each panel.
    pub y_range: Option<YRange>,
    /// Draw a colorbar (color feature present and distinct from the target).
    pub show_colorbar: bool,
    /// Draw tick marks on the colorbar. Off for categorical color features.
    pub colorbar_tick_marks: bool,
    /// Point count exceeds the rasterization threshold.
    pub rasterize: bool,
    pub palette: Palette,
}

impl PanelSpec {
    /// Number of plotted points.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.x.len()
    }

    /// Color of every point, in point order.
    pub fn point_colors(&self) -> Vec<Rgb> {
        match (&self.color, &self.color_values) {
            (Some(spec), Some(values)) => values
                .iter()
                .map(|&v| self.palette.color_at(spec.normalize(v)))
                .collect(),
            _ => vec![self.palette.primary; self.n_points()],
        }
    }
}
