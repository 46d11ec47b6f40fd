//! Statistical transforms used by the normalization pipeline
//!
//! All functions are pure and operate on a pixel buffer and/or the subset of
//! it selected by the validity mask.

mod sigma_clip;
mod zscale;
mod minmax;

pub use sigma_clip::{
    BACKGROUND_SIGMA, ClippedStats, DEFAULT_MAX_ITERS, robust_background, saturate, sigma_clip,
    sigma_clip_bounds,
};
pub use zscale::{ZScaleParams, zscale_limits, zscale_stretch};
pub use minmax::min_max_normalize;

/// Median of `values` (mean of the two middle elements for even lengths).
///
/// `scratch` is overwritten; `values` must be non-empty.
pub(crate) fn median(values: &[f32], scratch: &mut Vec<f32>) -> f64 {
    debug_assert!(!values.is_empty());

    scratch.clear();
    scratch.extend_from_slice(values);

    let mid = scratch.len() / 2;
    let (left, upper, _) = scratch.select_nth_unstable_by(mid, f32::total_cmp);
    let upper = f64::from(*upper);

    if values.len() % 2 == 1 {
        upper
    } else {
        let lower = left.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        (f64::from(lower) + upper) * 0.5
    }
}

/// Mean and population standard deviation, accumulated in f64.
pub(crate) fn mean_std(values: &[f32]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}
