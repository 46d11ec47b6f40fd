//! Test fixtures shared across the pipeline modules.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fitsio::FitsFile;
use fitsio::images::{ImageDescription, ImageType};

use crate::image_pipeline::batch::ProgressReporter;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::fits::{FitsImageReader, RawImage};
use crate::image_pipeline::raster::{RasterImage, RasterWriter};

/// Serves images by path; unknown paths fail to decode.
#[derive(Default)]
pub struct MockReader {
    images: HashMap<PathBuf, RawImage>,
    pub reads: Arc<AtomicUsize>,
}

impl MockReader {
    pub fn with_image(mut self, path: impl Into<PathBuf>, image: RawImage) -> Self {
        self.images.insert(path.into(), image);
        self
    }
}

impl FitsImageReader for MockReader {
    fn read_image(&self, path: &Path) -> Result<RawImage> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| ConversionError::DecodeError(format!("{}: mock decode error", path.display())))
    }
}

/// Writes the raw raster bytes and keeps a copy of every raster.
#[derive(Default)]
pub struct MockWriter {
    pub should_fail: bool,
    pub written: Arc<Mutex<Vec<RasterImage>>>,
}

impl RasterWriter for MockWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("Mock encode error".to_string()));
        }
        output.write_all(&image.data)?;
        self.written.lock().unwrap().push(image.clone());
        Ok(())
    }
}

/// A small image with a gradient of valid signal.
pub fn signal_image() -> RawImage {
    RawImage::new(4, 3, (1..=12).map(|v| v as f32 * 10.0).collect()).unwrap()
}

pub fn blank_image() -> RawImage {
    let mut data = vec![0.0; 12];
    data[5] = f32::NAN;
    RawImage::new(4, 3, data).unwrap()
}

/// Collects reported counts in emission order.
#[derive(Default)]
pub struct RecordingProgress {
    pub lines: Mutex<Vec<(usize, usize)>>,
}

impl RecordingProgress {
    pub fn lines(&self) -> Vec<(usize, usize)> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, completed: usize, total: usize) {
        self.lines.lock().unwrap().push((completed, total));
    }
}

/// Write a float FITS primary image; `dimensions` are slowest axis first.
pub fn write_fits(path: &Path, dimensions: &[usize], data: &[f32]) {
    let description = ImageDescription {
        data_type: ImageType::Float,
        dimensions,
    };
    let mut fptr = FitsFile::create(path)
        .with_custom_primary(&description)
        .open()
        .unwrap();
    let hdu = fptr.primary_hdu().unwrap();
    hdu.write_image(&mut fptr, data).unwrap();
}
