use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode FITS image: {0}")]
    DecodeError(String),

    #[error("Failed to encode raster image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Degenerate statistics: {0}")]
    DegenerateStatistics(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors that abort a whole batch before any file is submitted.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to read work list {path}: {source}")]
    WorkListUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output directory {path} is unusable: {reason}")]
    OutputDirUnusable { path: PathBuf, reason: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
