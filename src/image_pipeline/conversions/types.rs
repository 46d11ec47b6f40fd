//! Conversion result types

use std::path::{Path, PathBuf};

use crate::image_pipeline::common::timing::PipelineTimings;

/// Result of a successful single-image conversion
#[derive(Debug)]
pub struct ConversionReport {
    pub width: usize,
    pub height: usize,
    /// The input had no valid pixels and an all-zero image was written
    pub blank: bool,
    pub timings: PipelineTimings,
}

/// What happened to one input of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Converted {
        input: PathBuf,
        output: PathBuf,
        blank: bool,
    },
    /// The output already existed and overwriting was disabled
    Skipped { input: PathBuf, output: PathBuf },
    Failed { input: PathBuf, reason: String },
}

impl Outcome {
    pub fn input(&self) -> &Path {
        match self {
            Outcome::Converted { input, .. }
            | Outcome::Skipped { input, .. }
            | Outcome::Failed { input, .. } => input,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Outcome::Converted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}
