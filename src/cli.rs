use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::image_pipeline::batch::types::DEFAULT_PROGRESS_INTERVAL;
use crate::image_pipeline::{BatchConfig, OutputFormat, PipelineConfig, RenderMode, TiffCompression};

/// Batch-convert FITS images into 8-bit raster images
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Text file listing one input FITS path per line
    #[arg(value_name = "WORK_LIST")]
    pub work_list: PathBuf,

    /// Directory receiving the converted images
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Replace output files that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Subtract the sigma-clipped background level
    #[arg(long)]
    pub subtract_background: bool,

    /// Saturate pixels outside the sigma-clipped bounds
    #[arg(long)]
    pub clip: bool,

    /// Lower clipping threshold, in standard deviations
    #[arg(long, default_value_t = 5.0)]
    pub sigma_low: f64,

    /// Upper clipping threshold, in standard deviations
    #[arg(long, default_value_t = 30.0)]
    pub sigma_up: f64,

    /// Apply a zscale stretch
    #[arg(long)]
    pub zscale: bool,

    /// Zscale contrast
    #[arg(long, default_value_t = 0.25)]
    pub contrast: f64,

    /// Skip the final min-max rescale onto [0, 1]
    #[arg(long)]
    pub no_min_max: bool,

    /// How normalized images become pixels
    #[arg(long, value_enum, default_value_t = RenderArg::Direct)]
    pub render_mode: RenderArg,

    /// Output file format
    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    pub format: FormatArg,

    /// Compression for TIFF output
    #[arg(long, value_enum, default_value_t = CompressionArg::Lzw)]
    pub tiff_compression: CompressionArg,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Print progress every N completed files
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderArg {
    /// Grayscale, one byte per pixel
    Direct,
    /// Viridis colormap, autoscaled
    Rendered,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Png,
    Tiff,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionArg {
    None,
    Lzw,
    Deflate,
}

impl From<RenderArg> for RenderMode {
    fn from(arg: RenderArg) -> Self {
        match arg {
            RenderArg::Direct => RenderMode::Direct,
            RenderArg::Rendered => RenderMode::Rendered,
        }
    }
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::Deflate => TiffCompression::Deflate,
        }
    }
}

impl Args {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::builder()
            .subtract_background(self.subtract_background)
            .clip_data(self.clip)
            .sigma_low(self.sigma_low)
            .sigma_up(self.sigma_up)
            .apply_zscale(self.zscale)
            .contrast(self.contrast)
            .apply_min_max(!self.no_min_max)
            .render_mode(self.render_mode.into())
            .build()
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig::new(&self.output_dir)
            .overwrite(self.overwrite)
            .progress_interval(self.progress_interval)
            .threads(self.threads)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.into()
    }
}
