use crate::image_pipeline::common::error::{ConversionError, Result};

/// Rescale every element of `data` onto [0, 1] using the extremes of `valid`.
///
/// Returns the `(min, max)` pair that was used. An empty valid set or a
/// constant one is reported as degenerate instead of dividing by zero.
pub fn min_max_normalize(data: &mut [f32], valid: &[f32]) -> Result<(f64, f64)> {
    let (min, max) = valid
        .iter()
        .map(|&v| f64::from(v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        });

    if valid.is_empty() {
        return Err(ConversionError::DegenerateStatistics(
            "min-max normalization has no valid pixels".to_string(),
        ));
    }
    if max == min {
        return Err(ConversionError::DegenerateStatistics(format!(
            "min-max normalization range is empty (min = max = {min})"
        )));
    }

    let range = max - min;
    for v in data.iter_mut() {
        *v = ((f64::from(*v) - min) / range) as f32;
    }

    Ok((min, max))
}
