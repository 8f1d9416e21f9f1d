//! Deterministic synthetic inputs for tests and benchmarks.
//!
//! Every fixture has three features:
//! - feature 0: continuous, uniform in `[0, 1)`
//! - feature 1: binary, `{0, 1}`
//! - feature 2: continuous noise, uniform in `[0, 1)`

use ndarray::{Array2, Array3};
use rand::prelude::*;

/// Generate random dense features in `[min, max)`, shape `[rows, cols]`.
pub fn random_features(rows: usize, cols: usize, seed: u64, min: f64, max: f64) -> Array2<f64> {
    assert!(max >= min);
    let mut rng = StdRng::seed_from_u64(seed);
    let width = max - min;
    Array2::from_shape_simple_fn((rows, cols), || min + rng.r#gen::<f64>() * width)
}

fn three_features(n: usize, seed: u64) -> Array2<f64> {
    let mut features = random_features(n, 3, seed, 0.0, 1.0);
    features.column_mut(1).mapv_inplace(|v| if v < 0.5 { 0.0 } else { 1.0 });
    features
}

/// Features plus an attribution matrix in which feature 0's attribution
/// flips sign with feature 1.
///
/// Attributions: `phi0 = x0 * (2 x1 - 1)`, `phi1 = 0.1 x1`, `phi2 = 0.01 x2`.
pub fn interaction_fixture(n: usize, seed: u64) -> (Array2<f64>, Array2<f64>) {
    let features = three_features(n, seed);
    let mut shap = Array2::zeros((n, 3));
    for (i, row) in features.outer_iter().enumerate() {
        shap[[i, 0]] = row[0] * (2.0 * row[1] - 1.0);
        shap[[i, 1]] = 0.1 * row[1];
        shap[[i, 2]] = 0.01 * row[2];
    }
    (features, shap)
}

/// Features plus a symmetric `[n, 3, 3]` interaction tensor.
///
/// Feature 0's main effect is small, its interaction with feature 2 is the
/// largest, and its interaction with feature 1 sits in between. Summed
/// magnitudes along `tensor[:, 0, :]` therefore order as `2, 1, 0`.
pub fn interaction_tensor_fixture(n: usize, seed: u64) -> (Array2<f64>, Array3<f64>) {
    let features = three_features(n, seed);
    let mut tensor = Array3::zeros((n, 3, 3));
    for (i, row) in features.outer_iter().enumerate() {
        let (x0, x1, x2) = (row[0], row[1], row[2]);
        let off01 = 0.5 * (x0 - 0.5) * (2.0 * x1 - 1.0);
        let off02 = 2.0 * (x2 - 0.5);
        tensor[[i, 0, 0]] = 0.05 * (x0 - 0.5);
        tensor[[i, 1, 1]] = 0.2 * x1;
        tensor[[i, 2, 2]] = 0.3 * x2;
        tensor[[i, 0, 1]] = off01;
        tensor[[i, 1, 0]] = off01;
        tensor[[i, 0, 2]] = off02;
        tensor[[i, 2, 0]] = off02;
    }
    (features, tensor)
}
