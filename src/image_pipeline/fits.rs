//! FITS image reading module
//!
//! Decodes the primary image HDU of a FITS file into a single-channel
//! floating-point array.

mod reader;
mod fitsio_reader;
pub mod types;

pub use reader::FitsImageReader;
pub use fitsio_reader::FitsioReader;
pub use types::RawImage;
