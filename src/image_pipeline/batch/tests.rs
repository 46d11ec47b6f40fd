use std::path::{Path, PathBuf};

use crate::image_pipeline::batch::{BatchConfig, BatchConverter, BatchSummary};
use crate::image_pipeline::common::error::{BatchError, Result};
use crate::image_pipeline::conversions::{FitsToRasterPipeline, Outcome};
use crate::image_pipeline::fits::{FitsImageReader, FitsioReader, RawImage};
use crate::image_pipeline::normalize::PipelineConfig;
use crate::image_pipeline::raster::PngRasterWriter;
use crate::image_pipeline::test_support::{
    MockReader, MockWriter, RecordingProgress, blank_image, signal_image, write_fits,
};

fn mock_batch(reader: MockReader, config: BatchConfig) -> BatchConverter<MockReader, MockWriter> {
    let pipeline =
        FitsToRasterPipeline::with_custom(reader, MockWriter::default(), PipelineConfig::default());
    BatchConverter::new(pipeline, config)
}

#[test]
fn test_signal_blank_and_corrupt_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let inputs_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    std::fs::create_dir(&inputs_dir).unwrap();

    let signal = inputs_dir.join("signal.fits");
    let blank = inputs_dir.join("blank.fits");
    let corrupt = inputs_dir.join("corrupt.fits");
    write_fits(&signal, &[3, 4], &(1..=12).map(|v| v as f32).collect::<Vec<_>>());
    write_fits(&blank, &[3, 4], &[0.0; 12]);
    std::fs::write(&corrupt, b"SIMPLE = garbage").unwrap();

    let pipeline = FitsToRasterPipeline::new(PipelineConfig::default());
    let batch = BatchConverter::new(pipeline, BatchConfig::new(&output_dir).overwrite(true));
    let reporter = RecordingProgress::default();

    let inputs = vec![signal.clone(), blank.clone(), corrupt.clone()];
    let summary = batch.run(&inputs, &reporter).unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.converted, 2);
    assert_eq!(summary.blank, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        summary.outcomes[0],
        Outcome::Converted {
            input: signal,
            output: output_dir.join("signal.png"),
            blank: false,
        }
    );
    assert_eq!(
        summary.outcomes[1],
        Outcome::Converted {
            input: blank,
            output: output_dir.join("blank.png"),
            blank: true,
        }
    );
    assert!(summary.outcomes[2].is_failed());
    assert_eq!(summary.failures().next().unwrap().0, corrupt.as_path());
    assert_eq!(reporter.lines().last(), Some(&(3, 3)));

    let blank_png = image::open(output_dir.join("blank.png")).unwrap().into_luma8();
    assert_eq!(blank_png.dimensions(), (4, 3));
    assert!(blank_png.pixels().all(|p| p.0[0] == 0));

    let signal_png = image::open(output_dir.join("signal.png")).unwrap().into_luma8();
    assert_eq!(signal_png.dimensions(), (4, 3));
    // First stored row ends up at the bottom: minimum bottom-left, maximum top-right
    assert_eq!(signal_png.get_pixel(0, 2).0[0], 0);
    assert_eq!(signal_png.get_pixel(3, 0).0[0], 255);
    assert!(!output_dir.join("corrupt.png").exists());
}

#[test]
fn test_progress_cadence_for_250_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut reader = MockReader::default();
    let inputs: Vec<PathBuf> = (0..250)
        .map(|i| PathBuf::from(format!("/data/frame_{i:03}.fits")))
        .collect();
    for input in &inputs {
        reader = reader.with_image(input, signal_image());
    }
    let config = BatchConfig::new(dir.path())
        .progress_interval(100)
        .threads(Some(4));
    let reporter = RecordingProgress::default();

    let summary = mock_batch(reader, config).run(&inputs, &reporter).unwrap();

    assert_eq!(summary.converted, 250);
    assert_eq!(reporter.lines(), vec![(100, 250), (200, 250), (250, 250)]);
}

#[test]
fn test_second_run_skips_everything() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<PathBuf> = (0..5)
        .map(|i| PathBuf::from(format!("/data/frame_{i}.fits")))
        .collect();
    let build_reader = || {
        inputs
            .iter()
            .fold(MockReader::default(), |reader, input| reader.with_image(input, signal_image()))
    };

    let first = mock_batch(build_reader(), BatchConfig::new(dir.path()))
        .run(&inputs, &RecordingProgress::default())
        .unwrap();
    let before: Vec<Vec<u8>> = (0..5)
        .map(|i| std::fs::read(dir.path().join(format!("frame_{i}.png"))).unwrap())
        .collect();

    let reader = build_reader();
    let reads = reader.reads.clone();
    let reporter = RecordingProgress::default();
    let second = mock_batch(reader, BatchConfig::new(dir.path()))
        .run(&inputs, &reporter)
        .unwrap();
    let after: Vec<Vec<u8>> = (0..5)
        .map(|i| std::fs::read(dir.path().join(format!("frame_{i}.png"))).unwrap())
        .collect();

    assert_eq!(first.converted, 5);
    assert_eq!(second.skipped, 5);
    assert!(second.outcomes.iter().all(Outcome::is_skipped));
    assert_eq!(reads.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert_eq!(before, after);
    // Skipped inputs still count toward progress
    assert_eq!(reporter.lines(), vec![(5, 5)]);
}

#[test]
fn test_failures_do_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<PathBuf> = (0..20)
        .map(|i| PathBuf::from(format!("/data/frame_{i}.fits")))
        .collect();
    let reader = inputs
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 0)
        .fold(MockReader::default(), |reader, (i, input)| {
            let image = if i % 4 == 0 { signal_image() } else { blank_image() };
            reader.with_image(input, image)
        });
    let reporter = RecordingProgress::default();

    let summary = mock_batch(reader, BatchConfig::new(dir.path()).progress_interval(5))
        .run(&inputs, &reporter)
        .unwrap();

    assert_eq!(summary.converted, 10);
    assert_eq!(summary.blank, 5);
    assert_eq!(summary.failed, 10);
    assert_eq!(summary.failures().count(), 10);
    assert_eq!(
        reporter.lines(),
        vec![(5, 20), (10, 20), (15, 20), (20, 20)]
    );
}

/// Panics on one chosen input, decodes everything else.
struct PanickingReader {
    poisoned: PathBuf,
}

impl FitsImageReader for PanickingReader {
    fn read_image(&self, path: &Path) -> Result<RawImage> {
        if path == self.poisoned {
            panic!("corrupt header in {}", path.display());
        }
        Ok(signal_image())
    }
}

#[test]
fn test_panicking_input_fails_alone() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![
        PathBuf::from("/data/a.fits"),
        PathBuf::from("/data/bad.fits"),
        PathBuf::from("/data/c.fits"),
    ];
    let reader = PanickingReader {
        poisoned: PathBuf::from("/data/bad.fits"),
    };
    let pipeline =
        FitsToRasterPipeline::with_custom(reader, MockWriter::default(), PipelineConfig::default());
    let batch = BatchConverter::new(pipeline, BatchConfig::new(dir.path()).threads(Some(2)));
    let reporter = RecordingProgress::default();

    let summary = batch.run(&inputs, &reporter).unwrap();

    assert_eq!(summary.converted, 2);
    assert_eq!(summary.failed, 1);
    assert!(summary.outcomes[0].is_converted());
    assert!(summary.outcomes[2].is_converted());
    match &summary.outcomes[1] {
        Outcome::Failed { input, reason } => {
            assert_eq!(input, &inputs[1]);
            assert!(reason.starts_with("panicked: corrupt header in"), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(reporter.lines(), vec![(3, 3)]);
}

#[test]
fn test_empty_batch_reports_zero() {
    let dir = tempfile::tempdir().unwrap();
    let reporter = RecordingProgress::default();

    let summary = mock_batch(MockReader::default(), BatchConfig::new(dir.path()))
        .run(&[], &reporter)
        .unwrap();

    assert_eq!(summary, BatchSummary::from_outcomes(Vec::new()));
    assert_eq!(reporter.lines(), vec![(0, 0)]);
}

#[test]
fn test_run_work_list() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("files.txt");
    std::fs::write(&list, "/data/a.fits  \n\n/data/b.fits\n").unwrap();
    let reader = MockReader::default()
        .with_image("/data/a.fits", signal_image())
        .with_image("/data/b.fits", signal_image());
    let output_dir = dir.path().join("out");
    let reporter = RecordingProgress::default();

    let summary = mock_batch(reader, BatchConfig::new(&output_dir))
        .run_work_list(&list, &reporter)
        .unwrap();

    assert_eq!(summary.converted, 2);
    assert!(output_dir.join("a.png").exists());
    assert!(output_dir.join("b.png").exists());
    assert_eq!(reporter.lines(), vec![(2, 2)]);
}

#[test]
fn test_missing_work_list_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let reporter = RecordingProgress::default();

    let result = mock_batch(MockReader::default(), BatchConfig::new(dir.path()))
        .run_work_list(&dir.path().join("missing.txt"), &reporter);

    assert!(matches!(result, Err(BatchError::WorkListUnreadable { .. })));
    assert!(reporter.lines().is_empty());
}

#[test]
fn test_output_dir_that_is_a_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("taken");
    std::fs::write(&not_a_dir, b"").unwrap();
    let reader = MockReader::default().with_image("/data/a.fits", signal_image());
    let reporter = RecordingProgress::default();

    let result = mock_batch(reader, BatchConfig::new(&not_a_dir))
        .run(&[PathBuf::from("/data/a.fits")], &reporter);

    assert!(matches!(result, Err(BatchError::OutputDirUnusable { .. })));
    assert!(reporter.lines().is_empty());
}

#[test]
fn test_real_reader_and_writer_types_fit_the_driver() {
    let dir = tempfile::tempdir().unwrap();
    let batch: BatchConverter<FitsioReader, PngRasterWriter> = BatchConverter::new(
        FitsToRasterPipeline::new(PipelineConfig::default()),
        BatchConfig::new(dir.path()).threads(Some(1)),
    );

    assert_eq!(batch.config().threads, Some(1));
    assert!(!batch.config().overwrite);
    assert_eq!(batch.config().progress_interval, 100);
}
