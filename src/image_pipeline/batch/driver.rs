use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::image_pipeline::batch::progress::{ProgressCounter, ProgressReporter};
use crate::image_pipeline::batch::types::{BatchConfig, BatchSummary};
use crate::image_pipeline::batch::work_list::read_work_list;
use crate::image_pipeline::common::error::BatchError;
use crate::image_pipeline::conversions::{FitsToRasterPipeline, Outcome};
use crate::image_pipeline::fits::FitsImageReader;
use crate::image_pipeline::raster::RasterWriter;

/// Runs one conversion per input on a bounded worker pool.
pub struct BatchConverter<R: FitsImageReader, W: RasterWriter> {
    pipeline: FitsToRasterPipeline<R, W>,
    config: BatchConfig,
}

impl<R, W> BatchConverter<R, W>
where
    R: FitsImageReader + Sync,
    W: RasterWriter + Sync,
{
    pub fn new(pipeline: FitsToRasterPipeline<R, W>, config: BatchConfig) -> Self {
        Self { pipeline, config }
    }

    /// Create the output directory if needed and make sure it is a directory.
    pub fn prepare_output_dir(&self) -> Result<(), BatchError> {
        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir).map_err(|e| BatchError::OutputDirUnusable {
            path: dir.clone(),
            reason: e.to_string(),
        })?;
        if !dir.is_dir() {
            return Err(BatchError::OutputDirUnusable {
                path: dir.clone(),
                reason: "not a directory".to_string(),
            });
        }
        Ok(())
    }

    /// Read the work list at `list_path` and convert every entry.
    pub fn run_work_list(
        &self,
        list_path: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<BatchSummary, BatchError> {
        let inputs = read_work_list(list_path)?;
        info!("Read {} inputs from {}", inputs.len(), list_path.display());
        self.run(&inputs, reporter)
    }

    /// Convert every input and wait for all of them.
    ///
    /// Per-file failures are recorded in the summary; only setup problems
    /// (output directory, worker pool) are returned as errors, and those are
    /// detected before any file is touched.
    pub fn run(
        &self,
        inputs: &[PathBuf],
        reporter: &dyn ProgressReporter,
    ) -> Result<BatchSummary, BatchError> {
        self.prepare_output_dir()?;

        let total = inputs.len();
        if total == 0 {
            reporter.report(0, 0);
            return Ok(BatchSummary::from_outcomes(Vec::new()));
        }

        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|index| format!("fits2png-worker-{index}"));
        if let Some(threads) = self.config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        info!(
            "Converting {} files into {} with {} workers",
            total,
            self.config.output_dir.display(),
            pool.current_num_threads()
        );

        let start = Instant::now();
        let counter = ProgressCounter::new(total, self.config.progress_interval, reporter);
        let output_dir = self.config.output_dir.as_path();
        let overwrite = self.config.overwrite;

        let outcomes = pool.install(|| {
            inputs
                .par_iter()
                .map(|input| {
                    let outcome = self.process_isolated(input, output_dir, overwrite);
                    counter.complete_one();
                    outcome
                })
                .collect::<Vec<_>>()
        });

        let summary = BatchSummary::from_outcomes(outcomes);
        info!(
            "Batch finished in {:.2}s: {} converted ({} blank), {} skipped, {} failed",
            start.elapsed().as_secs_f64(),
            summary.converted,
            summary.blank,
            summary.skipped,
            summary.failed
        );
        for (input, reason) in summary.failures() {
            warn!("Failed: {}: {}", input.display(), reason);
        }

        Ok(summary)
    }

    /// Run one conversion; a panic inside the reader or writer becomes a
    /// failed outcome for that input only.
    fn process_isolated(&self, input: &Path, output_dir: &Path, overwrite: bool) -> Outcome {
        catch_unwind(AssertUnwindSafe(|| {
            self.pipeline.process(input, output_dir, overwrite)
        }))
        .unwrap_or_else(|payload| {
            let reason = format!("panicked: {}", panic_message(payload.as_ref()));
            error!("Failed to convert {}: {}", input.display(), reason);
            Outcome::Failed {
                input: input.to_path_buf(),
                reason,
            }
        })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
