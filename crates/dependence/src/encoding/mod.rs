//! Color channel encoding.
//!
//! A color feature is classified once by [`CategoricalDetector`]; the
//! resulting [`FeatureClassification`] drives [`ColorEncoder`], which
//! produces the clip bounds, discretization boundaries and colorbar ticks
//! in a [`ColorSpec`]. [`Palette`] turns normalized positions into colors.

mod classify;
mod color;
mod palette;

pub use classify::{CategoricalDetector, FeatureClassification, classify};
pub use color::{ColorEncoder, ColorSpec, Tick, category_ticks, encode};
pub use palette::{Palette, Rgb};
