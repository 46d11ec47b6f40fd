use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::RawImage;

pub trait FitsImageReader {
    fn read_image(&self, path: &Path) -> Result<RawImage>;
}
