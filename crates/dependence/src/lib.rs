//! dependence: interaction ranking and color encoding for attribution dependence panels.
//!
//! Given a feature matrix and per-instance attribution scores (a `[n, m]`
//! matrix or a `[n, m, m]` pairwise interaction tensor), this crate estimates
//! which features interact most strongly with a chosen target feature and
//! describes the panels an external renderer should draw: the values to plot,
//! the feature to color by, and how that feature maps onto a color scale.
//!
//! Nothing here draws. The output is a list of [`PanelSpec`] values.
//!
//! # Key Types
//!
//! - [`InteractionRanker`] - Windowed-correlation interaction estimator
//! - [`CategoricalDetector`] / [`ColorEncoder`] - Color channel classification and scaling
//! - [`PanelSelector`] - Matrix and tensor panel selection
//! - [`DependenceConfig`] - Configuration builder (constants, seed, threads, palette)
//!
//! # Example
//!
//! ```
//! use dependence::{Attributions, Coloring, FeatureMatrix, PanelData, PanelSelector, Target};
//! use dependence::DependenceConfig;
//! use ndarray::array;
//!
//! let features = array![[0.0, 0.0], [1.0, 0.0], [2.0, 1.0], [3.0, 1.0]];
//! let shap = array![[0.1, 0.0], [0.2, 0.0], [-0.1, 0.5], [-0.2, 0.5]];
//!
//! let data = PanelData::new(
//!     FeatureMatrix::new(features.view()),
//!     Attributions::Matrix(shap.view()),
//! )
//! .unwrap();
//!
//! let config = DependenceConfig::builder().seed(7).build().unwrap();
//! let panels = PanelSelector::new(&config)
//!     .select_panels(&Target::single(0usize), &Coloring::Auto, 1, &data)
//!     .unwrap();
//!
//! assert_eq!(panels.len(), 1);
//! assert_eq!(panels[0].color_feature, Some(1));
//! ```

pub mod config;
pub mod data;
pub mod encoding;
pub mod error;
pub mod interaction;
pub mod panels;
pub mod stats;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use config::{ConfigError, DependenceConfig};
pub use error::{DependenceError, Result};

pub use data::{Attributions, DisplayColumn, DisplayMatrix, DisplayValues, FeatureMatrix};
pub use data::{FeatureId, FeatureNames};

pub use interaction::{InstanceSampler, InteractionRanker, InteractionScore, rank};

pub use encoding::{
    CategoricalDetector, ColorEncoder, ColorSpec, FeatureClassification, Palette, Rgb, Tick,
    classify, encode,
};

pub use panels::{Coloring, PanelData, PanelKind, PanelSelector, PanelSpec, Target, YRange};

pub use utils::{Parallelism, run_with_threads};
