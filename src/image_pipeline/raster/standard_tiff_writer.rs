use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raster::types::{PixelLayout, RasterImage, TiffCompression};
use crate::image_pipeline::raster::writer::RasterWriter;

pub struct StandardTiffWriter {
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
}

impl Default for StandardTiffWriter {
    fn default() -> Self {
        Self {
            compression: TiffCompression::default(),
            predictor: Some(2),
        }
    }
}

impl RasterWriter for StandardTiffWriter {
    fn extension(&self) -> &'static str {
        "tiff"
    }

    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()> {
        let (width, height) = image.encoder_dimensions()?;
        debug!("Encoding TIFF image: {}x{}", width, height);

        let mut buffer = Vec::new();

        {
            let compression = match self.compression {
                TiffCompression::None => tiff::encoder::Compression::Uncompressed,
                TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
                TiffCompression::Deflate => tiff::encoder::Compression::Deflate(
                    tiff::encoder::compression::DeflateLevel::Fast,
                ),
            };

            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = self.predictor {
                let predictor = match predictor_val {
                    2 => tiff::tags::Predictor::Horizontal,
                    _ => tiff::tags::Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            match image.layout {
                PixelLayout::Gray8 => encoder
                    .write_image::<tiff::encoder::colortype::Gray8>(width, height, &image.data),
                PixelLayout::Rgb8 => encoder
                    .write_image::<tiff::encoder::colortype::RGB8>(width, height, &image.data),
            }
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
