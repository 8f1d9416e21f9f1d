//! Borrowed views over the numeric inputs.
//!
//! All matrices are sample-major: axis 0 is the instance, axis 1 the feature.
//! The interaction tensor adds a second feature axis: `[n, m, m]`.

use ndarray::{ArrayView1, ArrayView2, ArrayView3, Axis};

use crate::error::{DependenceError, Result};

/// Semantic axis constants.
pub mod axis {
    use ndarray::Axis;

    pub const SAMPLES: Axis = Axis(0);
    pub const FEATURES: Axis = Axis(1);
}

// =============================================================================
// FeatureMatrix
// =============================================================================

/// Raw feature values, shape `[n_samples, n_features]`. Never mutated.
#[derive(Debug, Clone, Copy)]
pub struct FeatureMatrix<'a>(ArrayView2<'a, f64>);

impl<'a> FeatureMatrix<'a> {
    pub fn new(view: ArrayView2<'a, f64>) -> Self {
        Self(view)
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.0.nrows()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.0.ncols()
    }

    /// Values of one feature across all samples.
    #[inline]
    pub fn feature(&self, feature: usize) -> ArrayView1<'a, f64> {
        self.0.index_axis_move(axis::FEATURES, feature)
    }

    #[inline]
    pub fn get(&self, sample: usize, feature: usize) -> f64 {
        self.0[[sample, feature]]
    }

    pub fn view(&self) -> ArrayView2<'a, f64> {
        self.0
    }

    /// Check that `feature` is a valid column.
    pub fn check_feature(&self, feature: usize) -> Result<()> {
        if feature < self.n_features() {
            Ok(())
        } else {
            Err(DependenceError::IndexOutOfRange {
                index: feature,
                n_features: self.n_features(),
            })
        }
    }
}

// =============================================================================
// Attributions
// =============================================================================

/// Attribution scores aligned with a [`FeatureMatrix`].
#[derive(Debug, Clone, Copy)]
pub enum Attributions<'a> {
    /// One score per instance per feature, `[n, m]`.
    Matrix(ArrayView2<'a, f64>),
    /// Pairwise interaction effects, `[n, m, m]`.
    Tensor(ArrayView3<'a, f64>),
}

impl<'a> Attributions<'a> {
    #[inline]
    pub fn n_samples(&self) -> usize {
        match self {
            Attributions::Matrix(m) => m.nrows(),
            Attributions::Tensor(t) => t.len_of(Axis(0)),
        }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        match self {
            Attributions::Matrix(m) => m.ncols(),
            Attributions::Tensor(t) => t.len_of(Axis(1)),
        }
    }

    #[inline]
    pub fn is_tensor(&self) -> bool {
        matches!(self, Attributions::Tensor(_))
    }

    /// Check alignment with `features`.
    ///
    /// # Errors
    ///
    /// [`DependenceError::ShapeMismatch`] if the instance count or any feature
    /// axis differs from the feature matrix.
    pub fn check_aligned(&self, features: &FeatureMatrix<'_>) -> Result<()> {
        let (n, m) = (features.n_samples(), features.n_features());
        match self {
            Attributions::Matrix(a) => {
                if a.dim() != (n, m) {
                    return Err(DependenceError::shape("attributions", &[n, m], a.shape()));
                }
            }
            Attributions::Tensor(t) => {
                if t.dim() != (n, m, m) {
                    return Err(DependenceError::shape("interaction tensor", &[n, m, m], t.shape()));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Display values
// =============================================================================

/// One feature's presentation values.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayColumn {
    /// Numeric display values (the raw values are shown as-is).
    Numeric(Vec<f64>),
    /// String labels, one per instance.
    Text(Vec<String>),
}

impl DisplayColumn {
    pub fn len(&self) -> usize {
        match self {
            DisplayColumn::Numeric(v) => v.len(),
            DisplayColumn::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> DisplayValues<'_> {
        match self {
            DisplayColumn::Numeric(v) => DisplayValues::Numeric(ArrayView1::from(v.as_slice())),
            DisplayColumn::Text(v) => DisplayValues::Text(v),
        }
    }
}

/// Borrowed display values for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayValues<'a> {
    Numeric(ArrayView1<'a, f64>),
    Text(&'a [String]),
}

impl DisplayValues<'_> {
    pub fn len(&self) -> usize {
        match self {
            DisplayValues::Numeric(v) => v.len(),
            DisplayValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels, if the first display value is a string.
    pub fn labels(&self) -> Option<&[String]> {
        match self {
            DisplayValues::Text(v) if !v.is_empty() => Some(*v),
            _ => None,
        }
    }
}

/// Presentation values for every feature, column by column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayMatrix {
    columns: Vec<DisplayColumn>,
}

impl DisplayMatrix {
    pub fn new(columns: Vec<DisplayColumn>) -> Self {
        Self { columns }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn column(&self, feature: usize) -> Option<&DisplayColumn> {
        self.columns.get(feature)
    }

    /// Check alignment with `features`.
    pub fn check_aligned(&self, features: &FeatureMatrix<'_>) -> Result<()> {
        let (n, m) = (features.n_samples(), features.n_features());
        if self.columns.len() != m {
            return Err(DependenceError::shape("display matrix", &[n, m], &[n, self.columns.len()]));
        }
        if let Some(bad) = self.columns.iter().find(|c| c.len() != n) {
            return Err(DependenceError::shape("display column", &[n], &[bad.len()]));
        }
        Ok(())
    }
}
