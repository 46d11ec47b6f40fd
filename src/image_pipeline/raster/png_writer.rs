use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raster::types::{PixelLayout, RasterImage};
use crate::image_pipeline::raster::writer::RasterWriter;

pub struct PngRasterWriter;

impl RasterWriter for PngRasterWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()> {
        let (width, height) = image.encoder_dimensions()?;
        debug!("Encoding PNG image: {}x{}", width, height);

        let color_type = match image.layout {
            PixelLayout::Gray8 => ExtendedColorType::L8,
            PixelLayout::Rgb8 => ExtendedColorType::Rgb8,
        };

        PngEncoder::new(output)
            .write_image(&image.data, width, height, color_type)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
