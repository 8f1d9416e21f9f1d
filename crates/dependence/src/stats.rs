//! Small statistical kernels shared by the ranker and the encoder.

use std::collections::HashSet;

// =============================================================================
// Percentiles
// =============================================================================

/// Percentile of the finite entries of `values`, ignoring NaN and infinities.
///
/// Uses linear interpolation between closest ranks (numpy's default), so
/// `q = 50` on `[1, 2, 3, 4]` yields `2.5`.
///
/// # Arguments
/// * `values` - Values to summarize
/// * `q` - Percentile in `[0, 100]`
/// * `scratch` - Reusable buffer for the sorted finite values
///
/// # Returns
/// `None` if no finite value exists.
pub fn nan_percentile<I>(values: I, q: f64, scratch: &mut Vec<f64>) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    scratch.clear();
    scratch.extend(values.into_iter().filter(|v| v.is_finite()));
    if scratch.is_empty() {
        return None;
    }
    scratch.sort_unstable_by(f64::total_cmp);
    Some(percentile_sorted(scratch, q))
}

/// Percentile of an already sorted, non-empty slice.
#[inline]
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let pos = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Low/high percentile pair over the finite entries, with the count of finite entries.
///
/// Returns `(0.0, 0.0, 0)` when nothing is finite, so `low <= high` always holds.
pub fn percentile_bounds<I>(values: I, low: f64, high: f64) -> (f64, f64, usize)
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted = Vec::new();
    if nan_percentile(values, low, &mut sorted).is_none() {
        return (0.0, 0.0, 0);
    }
    // `sorted` now holds the finite values in order.
    let lo = percentile_sorted(&sorted, low);
    let hi = percentile_sorted(&sorted, high);
    (lo, hi.max(lo), sorted.len())
}

// =============================================================================
// Moments
// =============================================================================

/// Population standard deviation. NaN in, NaN out.
#[inline]
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    var.sqrt()
}

/// Pearson correlation coefficient of two equal-length slices.
///
/// Returns NaN when either side has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let r = cov / (var_a * var_b).sqrt();
    // Rounding can push |r| a hair past 1.
    r.clamp(-1.0, 1.0)
}

// =============================================================================
// Misc
// =============================================================================

/// `n` evenly spaced points from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Number of distinct values. All NaNs count as one value; `-0.0 == 0.0`.
pub fn distinct_count<I>(values: I) -> usize
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .map(canonical_bits)
        .collect::<HashSet<u64>>()
        .len()
}

/// Equality that treats NaN as equal to NaN.
#[inline]
pub fn same_value(a: f64, b: f64) -> bool {
    canonical_bits(a) == canonical_bits(b)
}

#[inline]
fn canonical_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}
