//! FITS image data types

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Decoded single-channel image, row-major.
///
/// Row 0 is the first row stored in the file, which FITS treats as the
/// bottom of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    /// Width of the image in pixels (NAXIS1)
    pub width: usize,
    /// Height of the image in pixels (NAXIS2)
    pub height: usize,
    /// Pixel values; may contain NaN, infinities and zero blanks
    pub data: Vec<f32>,
}

impl RawImage {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// A pixel takes part in statistics only when it is finite and non-zero.
#[inline]
pub fn is_valid_pixel(value: f32) -> bool {
    value != 0.0 && value.is_finite()
}

/// Collect the values selected by the validity mask.
pub fn valid_values(data: &[f32]) -> Vec<f32> {
    data.iter().copied().filter(|&v| is_valid_pixel(v)).collect()
}
