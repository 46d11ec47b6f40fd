use crate::image_pipeline::normalize::types::{Normalized, NormalizedImage, RenderMode};
use crate::image_pipeline::raster::colormap::{ColormapRenderer, FigureRenderer};
use crate::image_pipeline::raster::types::{PixelLayout, RasterImage};

/// Turn a pipeline result into an 8-bit raster.
///
/// Blank results always become an all-zero grayscale image, whatever the
/// render mode.
pub fn rasterize(normalized: Normalized, mode: RenderMode) -> RasterImage {
    match normalized {
        Normalized::Blank { width, height } => blank_raster(width, height),
        Normalized::Image(image) => match mode {
            RenderMode::Direct => quantize_flipped(&image),
            RenderMode::Rendered => ColormapRenderer::viridis().render(&image),
        },
    }
}

pub fn blank_raster(width: usize, height: usize) -> RasterImage {
    RasterImage {
        width,
        height,
        layout: PixelLayout::Gray8,
        data: vec![0; width * height],
    }
}

/// Scale to 0..=255 and reverse the row order so the first stored row ends
/// up at the bottom of the raster.
pub fn quantize_flipped(image: &NormalizedImage) -> RasterImage {
    let mut data = Vec::with_capacity(image.width * image.height);
    for y in (0..image.height).rev() {
        // Saturating cast: out-of-range values clamp to 0 or 255, NaN becomes 0
        data.extend(image.row(y).iter().map(|&v| (v * 255.0_f32) as u8));
    }

    RasterImage {
        width: image.width,
        height: image.height,
        layout: PixelLayout::Gray8,
        data,
    }
}
