use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::{RawImage, is_valid_pixel, valid_values};
use crate::image_pipeline::normalize::types::{Normalized, NormalizedImage, PipelineConfig};
use crate::image_pipeline::stats::{
    BACKGROUND_SIGMA, min_max_normalize, robust_background, saturate, sigma_clip_bounds,
    zscale_stretch,
};

/// Run the enabled normalization steps on `raw`, in a fixed order:
/// mask invalid pixels, short-circuit blank images, subtract background,
/// clip, zscale, min-max.
pub fn normalize(raw: RawImage, config: &PipelineConfig) -> Result<Normalized> {
    let RawImage {
        width,
        height,
        mut data,
    } = raw;

    for v in data.iter_mut() {
        if !is_valid_pixel(*v) {
            *v = 0.0;
        }
    }

    if data.iter().all(|&v| v == 0.0) {
        debug!("No valid pixels, emitting blank image");
        return Ok(Normalized::Blank { width, height });
    }

    if config.subtract_background {
        let background = robust_background(&valid_values(&data), BACKGROUND_SIGMA)?;
        debug!(background, "Subtracting background");
        // Masked pixels are shifted too and end up at -background
        for v in data.iter_mut() {
            *v = (f64::from(*v) - background) as f32;
        }
    }

    if config.clip_data {
        let (lower, upper) =
            sigma_clip_bounds(&valid_values(&data), config.sigma_low, config.sigma_up)?;
        debug!(lower, upper, "Clipping to sigma bounds");
        saturate(&mut data, lower, upper);
    }

    if config.apply_zscale {
        debug!(contrast = config.contrast, "Applying zscale stretch");
        zscale_stretch(&mut data, config.contrast);
    }

    if config.apply_min_max {
        let valid = valid_values(&data);
        let (min, max) = min_max_normalize(&mut data, &valid)?;
        debug!(min, max, "Applied min-max normalization");
    }

    Ok(Normalized::Image(NormalizedImage {
        width,
        height,
        data,
    }))
}
