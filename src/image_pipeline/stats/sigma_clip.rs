//! Iterative sigma clipping
//!
//! Each iteration centers on the median of the surviving values, measures
//! the population standard deviation, and rejects everything outside
//! `[median - sigma_lower * std, median + sigma_upper * std]`. Iteration stops
//! when nothing is rejected or after `max_iters` rounds. The bounds reported
//! are those of the last round.

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::stats::{mean_std, median};

/// Iteration cap used by the pipeline.
pub const DEFAULT_MAX_ITERS: usize = 5;

/// Clipping threshold for the background estimate.
pub const BACKGROUND_SIGMA: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub lower: f64,
    pub upper: f64,
    /// Number of values that survived clipping
    pub retained: usize,
    pub iterations: usize,
}

pub fn sigma_clip(
    values: &[f32],
    sigma_lower: f64,
    sigma_upper: f64,
    max_iters: usize,
) -> Result<ClippedStats> {
    let mut kept: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if kept.is_empty() {
        return Err(ConversionError::DegenerateStatistics(
            "sigma clipping needs at least one finite value".to_string(),
        ));
    }

    let mut scratch = Vec::with_capacity(kept.len());
    let mut lower = f64::NEG_INFINITY;
    let mut upper = f64::INFINITY;
    let mut iterations = 0;

    while iterations < max_iters.max(1) {
        iterations += 1;

        let center = median(&kept, &mut scratch);
        let (_, std) = mean_std(&kept);
        lower = center - sigma_lower * std;
        upper = center + sigma_upper * std;

        let before = kept.len();
        kept.retain(|&v| {
            let v = f64::from(v);
            v >= lower && v <= upper
        });

        if kept.is_empty() {
            return Err(ConversionError::DegenerateStatistics(format!(
                "sigma clipping rejected every value (bounds {lower}..{upper})"
            )));
        }
        if kept.len() == before {
            break;
        }
    }

    let (mean, std) = mean_std(&kept);
    Ok(ClippedStats {
        mean,
        median: median(&kept, &mut scratch),
        std,
        lower,
        upper,
        retained: kept.len(),
        iterations,
    })
}

/// Sigma-clipped mean of `values`, used as the sky background level.
pub fn robust_background(values: &[f32], sigma: f64) -> Result<f64> {
    sigma_clip(values, sigma, sigma, DEFAULT_MAX_ITERS).map(|stats| stats.mean)
}

/// Lower and upper clipping thresholds of `values`.
pub fn sigma_clip_bounds(values: &[f32], sigma_low: f64, sigma_up: f64) -> Result<(f64, f64)> {
    sigma_clip(values, sigma_low, sigma_up, DEFAULT_MAX_ITERS).map(|stats| (stats.lower, stats.upper))
}

/// Clamp every pixel into `[lower, upper]`. NaN pixels are left untouched.
pub fn saturate(data: &mut [f32], lower: f64, upper: f64) {
    for v in data.iter_mut() {
        let x = f64::from(*v);
        if x < lower {
            *v = lower as f32;
        } else if x > upper {
            *v = upper as f32;
        }
    }
}
