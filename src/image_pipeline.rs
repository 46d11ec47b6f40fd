//! Image processing pipeline module
//!
//! This module provides a structured approach to FITS to raster conversion,
//! with separate modules for FITS reading, statistics, normalization, raster
//! writing, single-file conversion and batch orchestration.

pub mod fits;
pub mod stats;
pub mod normalize;
pub mod raster;
pub mod conversions;
pub mod batch;
pub mod common;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::{
    BatchError,
    ConversionError,
    Result,
};

pub use fits::{
    FitsImageReader,
    FitsioReader,
    RawImage,
};

pub use normalize::{
    Normalized,
    NormalizedImage,
    PipelineConfig,
    PipelineConfigBuilder,
    RenderMode,
    normalize,
};

pub use raster::{
    OutputFormat,
    PngRasterWriter,
    RasterImage,
    RasterWriter,
    StandardTiffWriter,
    TiffCompression,
    rasterize,
};

pub use conversions::{
    FitsToRasterPipeline,
    Outcome,
};

pub use batch::{
    BatchConfig,
    BatchConverter,
    BatchSummary,
    ProgressReporter,
    StdoutProgress,
};
