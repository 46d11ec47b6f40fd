use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use fits2png_rs::cli::Args;
use fits2png_rs::image_pipeline::{
    BatchConverter, BatchSummary, FitsToRasterPipeline, FitsioReader, OutputFormat, PngRasterWriter,
    RasterWriter, StandardTiffWriter, StdoutProgress,
};
use fits2png_rs::logger;

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();

    info!("Starting fits2png...");

    let pipeline_config = args.pipeline_config();
    let batch_config = args.batch_config();

    info!("Work list: {}", args.work_list.display());
    info!("Output directory: {}", batch_config.output_dir.display());
    info!("Output format: {:?}", args.output_format());
    info!("Render mode: {:?}", pipeline_config.render_mode);
    info!(
        "Steps: background={} clip={} (sigma {}/{}) zscale={} (contrast {}) min-max={}",
        pipeline_config.subtract_background,
        pipeline_config.clip_data,
        pipeline_config.sigma_low,
        pipeline_config.sigma_up,
        pipeline_config.apply_zscale,
        pipeline_config.contrast,
        pipeline_config.apply_min_max
    );
    info!(
        "Overwrite existing outputs: {}",
        if batch_config.overwrite {
            "enabled"
        } else {
            "disabled"
        }
    );

    let summary = match args.output_format() {
        OutputFormat::Png => run_batch(&args, PngRasterWriter)?,
        OutputFormat::Tiff => run_batch(
            &args,
            StandardTiffWriter {
                compression: args.tiff_compression.into(),
                ..StandardTiffWriter::default()
            },
        )?,
    };

    if summary.failed > 0 {
        warn!("{} of {} files failed", summary.failed, summary.total);
    }

    Ok(())
}

fn run_batch<W: RasterWriter + Sync>(args: &Args, writer: W) -> anyhow::Result<BatchSummary> {
    let pipeline = FitsToRasterPipeline::with_custom(FitsioReader, writer, args.pipeline_config());
    let batch = BatchConverter::new(pipeline, args.batch_config());

    batch
        .run_work_list(&args.work_list, &StdoutProgress)
        .with_context(|| format!("Batch over {} aborted", args.work_list.display()))
}
