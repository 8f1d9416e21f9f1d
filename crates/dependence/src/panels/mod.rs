//! Panel selection and the renderer-facing panel description.
//!
//! [`PanelSelector`] turns a target feature and its attributions into an
//! ordered list of [`PanelSpec`]s. Each spec is self-contained: x and y
//! values, the color feature with its [`ColorSpec`](crate::ColorSpec), and an
//! optional y range shared across the selection.

mod selector;
mod spec;

pub use selector::{Coloring, PanelData, PanelSelector, Target};
pub use spec::{PanelKind, PanelSpec, YRange};
