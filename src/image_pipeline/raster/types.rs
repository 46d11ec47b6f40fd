//! Raster image and encoding option types

use crate::image_pipeline::common::error::{ConversionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// One byte per pixel
    Gray8,
    /// Three bytes per pixel, interleaved [R, G, B, R, G, B, ...]
    Rgb8,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray8 => 1,
            PixelLayout::Rgb8 => 3,
        }
    }
}

/// 8-bit raster ready for encoding, top row first
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: usize,
    pub height: usize,
    pub layout: PixelLayout,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Width and height as the `u32` pair encoders expect.
    pub fn encoder_dimensions(&self) -> Result<(u32, u32)> {
        match (u32::try_from(self.width), u32::try_from(self.height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
            _ => Err(ConversionError::InvalidDimensions(self.width, self.height)),
        }
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * self.layout.channels();
        &self.data[y * stride..(y + 1) * stride]
    }
}

/// Encoded file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Tiff,
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    #[default]
    Lzw,
    /// Deflate compression, fast level
    Deflate,
}
