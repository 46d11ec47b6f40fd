//! Pipeline conversions module
//!
//! Per-file orchestration: decode, normalize, rasterize, encode, and the
//! skip/overwrite policy around it.

mod fits_to_raster;
pub mod types;


pub use fits_to_raster::FitsToRasterPipeline;
pub use types::{ConversionReport, Outcome};
