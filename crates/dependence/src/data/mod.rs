//! Input data: feature, attribution and display matrices, plus feature names.
//!
//! Ingestion of labeled tables is left to the caller. This module only
//! consumes already-resolved numeric arrays and a separate name table.

mod matrix;
mod resolve;

pub use matrix::{Attributions, DisplayColumn, DisplayMatrix, DisplayValues, FeatureMatrix, axis};
pub use resolve::{FeatureId, FeatureNames, resolve};
