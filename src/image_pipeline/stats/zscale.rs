//! Zscale display limits
//!
//! A sample of the finite pixels is sorted and a straight line is fitted to
//! the sorted values with iterative k-sigma rejection. The slope of that line,
//! divided by the contrast, gives the display range around the sample median.
//! When too many samples are rejected the full sample range is used instead.

use crate::image_pipeline::stats::mean_std;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScaleParams {
    /// Maximum number of samples drawn from the image
    pub n_samples: usize,
    /// Scaling factor applied to the fitted slope
    pub contrast: f64,
    /// Fraction of samples that may be rejected before giving up on the fit
    pub max_reject: f64,
    /// Lower bound on the number of surviving samples
    pub min_npixels: usize,
    /// Rejection threshold in units of the residual standard deviation
    pub krej: f64,
    pub max_iterations: usize,
}

impl Default for ZScaleParams {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            contrast: 0.25,
            max_reject: 0.5,
            min_npixels: 5,
            krej: 2.5,
            max_iterations: 5,
        }
    }
}

impl ZScaleParams {
    pub fn with_contrast(contrast: f64) -> Self {
        Self {
            contrast,
            ..Self::default()
        }
    }
}

/// Compute `(vmin, vmax)`; `None` when `values` holds no finite value.
pub fn zscale_limits(values: &[f32], params: &ZScaleParams) -> Option<(f64, f64)> {
    let samples = sample_sorted(values, params.n_samples.max(1));
    let npix = samples.len();
    if npix == 0 {
        return None;
    }

    let mut vmin = samples[0];
    let mut vmax = samples[npix - 1];

    let minpix = params
        .min_npixels
        .max((npix as f64 * params.max_reject) as usize);
    let ngrow = ((npix as f64 * 0.01) as usize).max(1);

    let mut badpix = vec![false; npix];
    let mut ngoodpix = npix;
    let mut last_ngoodpix = npix + 1;
    let mut slope = 0.0;

    for _ in 0..params.max_iterations {
        if ngoodpix >= last_ngoodpix || ngoodpix < minpix {
            break;
        }

        let (fit_slope, intercept) = fit_line(&samples, &badpix);
        slope = fit_slope;

        let flat: Vec<f64> = samples
            .iter()
            .enumerate()
            .map(|(i, &y)| y - (intercept + fit_slope * i as f64))
            .collect();

        let good_residuals: Vec<f32> = flat
            .iter()
            .zip(&badpix)
            .filter(|&(_, &bad)| !bad)
            .map(|(&r, _)| r as f32)
            .collect();
        let (_, residual_std) = mean_std(&good_residuals);
        let threshold = params.krej * residual_std;

        for (bad, &r) in badpix.iter_mut().zip(&flat) {
            if r < -threshold || r > threshold {
                *bad = true;
            }
        }
        badpix = dilate(&badpix, ngrow);

        last_ngoodpix = ngoodpix;
        ngoodpix = badpix.iter().filter(|&&bad| !bad).count();
    }

    if ngoodpix >= minpix {
        if params.contrast > 0.0 {
            slope /= params.contrast;
        }
        let center = (npix - 1) / 2;
        let median = if npix % 2 == 1 {
            samples[npix / 2]
        } else {
            (samples[npix / 2 - 1] + samples[npix / 2]) * 0.5
        };
        vmin = vmin.max(median - (center as f64 - 1.0) * slope);
        vmax = vmax.min(median + (npix - center) as f64 * slope);
    }

    Some((vmin, vmax))
}

/// Map `data` linearly from its zscale limits onto [0, 1], clipping outside.
///
/// When there is no finite pixel the array becomes all zeros.
pub fn zscale_stretch(data: &mut [f32], contrast: f64) {
    match zscale_limits(data, &ZScaleParams::with_contrast(contrast)) {
        Some((vmin, vmax)) => apply_limits(data, vmin, vmax),
        None => data.fill(0.0),
    }
}

/// Clip-scale `data` between `vmin` and `vmax`.
///
/// A collapsed range (`vmax <= vmin`) thresholds at `vmin`: values above it
/// become 1 and everything else 0, the limit of the linear map as the range
/// shrinks.
fn apply_limits(data: &mut [f32], vmin: f64, vmax: f64) {
    if vmax > vmin {
        let range = vmax - vmin;
        for v in data.iter_mut() {
            *v = ((f64::from(*v) - vmin) / range).clamp(0.0, 1.0) as f32;
        }
    } else {
        for v in data.iter_mut() {
            *v = if f64::from(*v) > vmin { 1.0 } else { 0.0 };
        }
    }
}

/// Take up to `n_samples` finite values at a fixed stride and sort them.
fn sample_sorted(values: &[f32], n_samples: usize) -> Vec<f64> {
    let finite = values.iter().filter(|v| v.is_finite()).count();
    let stride = (finite / n_samples).max(1);

    let mut samples: Vec<f64> = values
        .iter()
        .filter(|v| v.is_finite())
        .step_by(stride)
        .take(n_samples)
        .map(|&v| f64::from(v))
        .collect();
    samples.sort_by(f64::total_cmp);
    samples
}

/// Least-squares line through `(i, samples[i])` over the samples not marked bad.
fn fit_line(samples: &[f64], badpix: &[bool]) -> (f64, f64) {
    let good = || {
        samples
            .iter()
            .enumerate()
            .zip(badpix)
            .filter(|&(_, &bad)| !bad)
            .map(|((i, &y), _)| (i as f64, y))
    };

    let n = good().count() as f64;
    let (sum_x, sum_y) = good().fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);

    let (sxy, sxx) = good().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
        let dx = x - mean_x;
        (sxy + dx * (y - mean_y), sxx + dx * dx)
    });

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    (slope, mean_y - slope * mean_x)
}

/// Grow the rejected set by a box of `ngrow` samples, centred like a
/// same-size discrete convolution.
fn dilate(badpix: &[bool], ngrow: usize) -> Vec<bool> {
    let len = badpix.len();
    let before = ngrow / 2;
    let after = (ngrow - 1) / 2;

    (0..len)
        .map(|i| {
            let lo = i.saturating_sub(before);
            let hi = (i + after).min(len - 1);
            badpix[lo..=hi].iter().any(|&bad| bad)
        })
        .collect()
}
