//! FITS reader implementation using the fitsio (cfitsio) library.
//!
//! Only the primary HDU is read. cfitsio applies BSCALE/BZERO while
//! converting to `f32`; BLANK values of integer images are passed through
//! unchanged, so blank sentinels reach the normalization pipeline as-is.

use std::path::Path;

use fitsio::FitsFile;
use fitsio::hdu::HduInfo;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::fits::reader::FitsImageReader;
use crate::image_pipeline::fits::types::RawImage;

/// FITS reader backed by cfitsio.
pub struct FitsioReader;

impl FitsImageReader for FitsioReader {
    fn read_image(&self, path: &Path) -> Result<RawImage> {
        debug!("Opening FITS file {}", path.display());

        std::fs::metadata(path)
            .map_err(|e| ConversionError::InputReadError(format!("{}: {}", path.display(), e)))?;

        let mut fptr = FitsFile::open(path)
            .map_err(|e| ConversionError::DecodeError(format!("{}: {}", path.display(), e)))?;

        let hdu = fptr
            .primary_hdu()
            .map_err(|e| ConversionError::DecodeError(format!("{}: {}", path.display(), e)))?;

        let shape = match &hdu.info {
            HduInfo::ImageInfo { shape, .. } => shape.clone(),
            HduInfo::TableInfo { .. } => {
                return Err(ConversionError::DecodeError(format!(
                    "{}: primary HDU is a table, not an image",
                    path.display()
                )));
            }
            HduInfo::AnyInfo => {
                return Err(ConversionError::DecodeError(format!(
                    "{}: unknown primary HDU type",
                    path.display()
                )));
            }
        };

        let (width, height) = image_plane(&shape).ok_or_else(|| {
            ConversionError::DecodeError(format!(
                "{}: unsupported image shape {:?}",
                path.display(),
                shape
            ))
        })?;

        let data: Vec<f32> = hdu
            .read_image(&mut fptr)
            .map_err(|e| ConversionError::DecodeError(format!("{}: {}", path.display(), e)))?;

        debug!("Decoded FITS image: {}x{}", width, height);

        RawImage::new(width, height, data)
    }
}

/// Reduce a fitsio shape (slowest axis first) to `(width, height)`.
///
/// Axes beyond the first two FITS axes are accepted only when they have
/// length 1; an empty primary HDU has no plane at all.
fn image_plane(shape: &[usize]) -> Option<(usize, usize)> {
    match shape {
        [] | [_] => None,
        [leading @ .., height, width] if leading.iter().all(|&n| n == 1) => {
            Some((*width, *height))
        }
        _ => None,
    }
}
