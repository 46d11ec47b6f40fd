//! Raster output module
//!
//! Quantizes normalized arrays to 8-bit rasters and encodes them as PNG or
//! TIFF files.

mod writer;
mod png_writer;
mod standard_tiff_writer;
mod rasterizer;
mod colormap;
pub mod types;

pub use writer::RasterWriter;
pub use png_writer::PngRasterWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use rasterizer::{blank_raster, quantize_flipped, rasterize};
pub use colormap::{ColormapRenderer, FigureRenderer};
pub use types::{OutputFormat, PixelLayout, RasterImage, TiffCompression};
