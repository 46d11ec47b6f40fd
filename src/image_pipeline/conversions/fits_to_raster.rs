use std::ffi::OsString;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, info_span};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    common::timing::{PipelineTimings, Timer},
    conversions::types::{ConversionReport, Outcome},
    fits::{FitsImageReader, FitsioReader, RawImage},
    normalize::{PipelineConfig, normalize},
    raster::{PngRasterWriter, RasterWriter, rasterize},
};

pub struct FitsToRasterPipeline<R: FitsImageReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
}

impl FitsToRasterPipeline<FitsioReader, PngRasterWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reader: FitsioReader,
            writer: PngRasterWriter,
            config,
        }
    }
}

impl<R: FitsImageReader, W: RasterWriter> FitsToRasterPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// `output_dir/<input stem>.<ext>`; only the last extension of the input
    /// is replaced.
    pub fn output_path(&self, input_path: &Path, output_dir: &Path) -> Option<PathBuf> {
        let stem = input_path.file_stem()?;
        let mut name = OsString::from(stem);
        name.push(".");
        name.push(self.writer.extension());
        Some(output_dir.join(name))
    }

    /// Normalize, rasterize and encode an already decoded image.
    pub fn convert(&self, raw: RawImage, output: &mut dyn Write) -> Result<ConversionReport> {
        let mut timings = PipelineTimings::new();
        let (width, height) = (raw.width, raw.height);

        let timer = Timer::start("normalize");
        let normalized = normalize(raw, &self.config)?;
        timings.record(timer);
        let blank = normalized.is_blank();

        let timer = Timer::start("rasterize");
        let raster = rasterize(normalized, self.config.render_mode);
        timings.record(timer);

        let timer = Timer::start("encode");
        self.writer.write_raster(&raster, output)?;
        timings.record(timer);

        Ok(ConversionReport {
            width,
            height,
            blank,
            timings,
        })
    }

    /// Decode `input_path` and write the raster to `output_path`.
    ///
    /// The raster is written to a temporary file next to the destination and
    /// renamed into place once encoding succeeded.
    pub fn convert_file(&self, input_path: &Path, output_path: &Path) -> Result<ConversionReport> {
        let timer = Timer::start("decode");
        let raw = self.reader.read_image(input_path)?;
        let (_, decode_duration) = timer.stop();

        let output_dir = match output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut staging = tempfile::Builder::new()
            .prefix(".fits2png-")
            .suffix(".part")
            .tempfile_in(output_dir)
            .map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
            })?;

        let mut report = {
            let mut output = BufWriter::new(staging.as_file_mut());
            let report = self.convert(raw, &mut output)?;
            output.flush()?;
            report
        };

        staging.persist(output_path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e.error))
        })?;

        report.timings.add_step("decode", decode_duration);
        Ok(report)
    }

    /// Convert one input into `output_dir`, never failing the caller.
    ///
    /// When the output already exists and `overwrite` is false the input is
    /// not decoded at all. Every error becomes [`Outcome::Failed`].
    pub fn process(&self, input_path: &Path, output_dir: &Path, overwrite: bool) -> Outcome {
        let span = info_span!("convert", input = %input_path.display());
        let _enter = span.enter();

        let Some(output_path) = self.output_path(input_path, output_dir) else {
            error!("{}: input path has no file name", input_path.display());
            return Outcome::Failed {
                input: input_path.to_path_buf(),
                reason: "input path has no file name".to_string(),
            };
        };

        if !overwrite && output_path.exists() {
            debug!(output = %output_path.display(), "Output exists, skipping");
            return Outcome::Skipped {
                input: input_path.to_path_buf(),
                output: output_path,
            };
        }

        match self.convert_file(input_path, &output_path) {
            Ok(report) => {
                if report.blank {
                    info!(
                        output = %output_path.display(),
                        "No valid signal, saved blank {}x{} image",
                        report.width,
                        report.height
                    );
                } else {
                    info!(
                        output = %output_path.display(),
                        "Converted {}x{} in {:.3}ms",
                        report.width,
                        report.height,
                        report.timings.total_duration().as_secs_f64() * 1000.0
                    );
                }
                report.timings.log_summary();
                Outcome::Converted {
                    input: input_path.to_path_buf(),
                    output: output_path,
                    blank: report.blank,
                }
            }
            Err(e) => {
                error!("Failed to convert {}: {}", input_path.display(), e);
                Outcome::Failed {
                    input: input_path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
