use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::types::RasterImage;

pub trait RasterWriter {
    /// File extension of the encoded format, without the dot
    fn extension(&self) -> &'static str;

    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()>;
}
