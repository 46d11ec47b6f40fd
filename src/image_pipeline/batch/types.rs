//! Batch configuration and summary types

use std::path::{Path, PathBuf};

use crate::image_pipeline::conversions::types::Outcome;

pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Settings fixed for the duration of one batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub output_dir: PathBuf,
    /// Replace outputs that already exist
    pub overwrite: bool,
    /// Emit a progress line every this many completions
    pub progress_interval: usize,
    /// Worker count; `None` uses the available parallelism
    pub threads: Option<usize>,
}

impl BatchConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            overwrite: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            threads: None,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}

/// Counts and per-file outcomes of a finished batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    /// Converted files that had no valid signal; included in `converted`
    pub blank: usize,
    pub skipped: usize,
    pub failed: usize,
    /// In work-list order
    pub outcomes: Vec<Outcome>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: Vec<Outcome>) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            converted: 0,
            blank: 0,
            skipped: 0,
            failed: 0,
            outcomes: Vec::new(),
        };
        for outcome in &outcomes {
            match outcome {
                Outcome::Converted { blank, .. } => {
                    summary.converted += 1;
                    if *blank {
                        summary.blank += 1;
                    }
                }
                Outcome::Skipped { .. } => summary.skipped += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary.outcomes = outcomes;
        summary
    }

    /// Failed inputs with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            Outcome::Failed { input, reason } => Some((input.as_path(), reason.as_str())),
            _ => None,
        })
    }
}
