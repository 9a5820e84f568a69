//! Deterministic numeric and statistical helpers.

#![forbid(unsafe_code)]

/// Round a floating point value to `decimals` decimal places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Arithmetic mean, `0.0` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of an ascending-sorted slice.
///
/// Odd lengths return the middle element, even lengths the mean of the two
/// middle elements. Empty input returns `0.0`.
#[must_use]
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Percentage `numer / denom * 100`, or `None` when `denom` is zero.
#[must_use]
pub fn percentage(numer: usize, denom: usize) -> Option<f64> {
    if denom == 0 {
        None
    } else {
        Some(numer as f64 / denom as f64 * 100.0)
    }
}

/// Size of the leading `fraction` of `total` items, never less than one.
#[must_use]
pub fn top_fraction_count(total: usize, fraction: f64) -> usize {
    ((total as f64 * fraction).ceil() as usize).max(1)
}

/// Express a `[0, 1]` ratio as a percentage with one decimal place.
#[must_use]
pub fn ratio_pct(ratio: f64) -> f64 {
    round_f64(ratio * 100.0, 1)
}

/// Whole-number percentage of a threshold, truncated toward zero.
#[must_use]
pub fn threshold_pct(threshold: f64) -> i64 {
    (threshold * 100.0) as i64
}
