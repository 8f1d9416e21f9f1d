//! Colors handed to the renderer.
//!
//! The palette is a plain value carried by the configuration and copied into
//! every panel; there is no process-wide colormap.

use serde::{Deserialize, Serialize};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Two-ended color scale plus the fixed colors used around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Color at the low end of the scale.
    pub low: Rgb,
    /// Color at the high end of the scale.
    pub high: Rgb,
    /// Point color when a panel has no color feature.
    pub primary: Rgb,
    /// Color for points whose color value is missing.
    pub missing: Rgb,
    /// Axis, tick and label color.
    pub axis: Rgb,
    /// Number of discrete steps in the scale.
    pub n_colors: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self::red_blue()
    }
}

impl Palette {
    /// Blue-to-red scale.
    pub fn red_blue() -> Self {
        Self {
            low: Rgb(0, 138, 250),
            high: Rgb(255, 0, 82),
            primary: Rgb(30, 136, 229),
            missing: Rgb(119, 119, 119),
            axis: Rgb(51, 51, 51),
            n_colors: 256,
        }
    }

    /// Color at normalized position `t` in `[0, 1]`.
    ///
    /// `t` is quantized to one of `n_colors` steps. NaN maps to `missing`.
    pub fn color_at(&self, t: f64) -> Rgb {
        if t.is_nan() {
            return self.missing;
        }
        if self.n_colors <= 1 {
            return self.low;
        }
        let step = ((t.clamp(0.0, 1.0) * self.n_colors as f64) as usize).min(self.n_colors - 1);
        self.low.lerp(self.high, step as f64 / (self.n_colors - 1) as f64)
    }
}
