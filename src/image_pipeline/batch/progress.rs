//! Completion counting and progress lines

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives `(completed, total)` each time a progress line is due.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, completed: usize, total: usize);
}

/// `"<completed> \ <total>"`
pub fn format_progress(completed: usize, total: usize) -> String {
    format!("{completed} \\ {total}")
}

/// Prints progress lines to stdout.
pub struct StdoutProgress;

impl ProgressReporter for StdoutProgress {
    fn report(&self, completed: usize, total: usize) {
        let mut stdout = std::io::stdout().lock();
        // Progress is best effort; write errors are ignored
        let _ = writeln!(stdout, "{}", format_progress(completed, total));
        let _ = stdout.flush();
    }
}

/// Shared completion counter for one batch.
///
/// Each call to [`complete_one`](Self::complete_one) observes a distinct
/// count. Reporting happens under a lock so lines come out in increasing
/// order even when tasks finish at the same time.
pub struct ProgressCounter<'a> {
    completed: AtomicUsize,
    total: usize,
    interval: usize,
    emit_lock: Mutex<()>,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> ProgressCounter<'a> {
    pub fn new(total: usize, interval: usize, reporter: &'a dyn ProgressReporter) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
            interval: interval.max(1),
            emit_lock: Mutex::new(()),
            reporter,
        }
    }

    /// Record one finished task and report if the new count is due.
    pub fn complete_one(&self) -> usize {
        // Hold the lock across increment and report to keep lines ordered
        let _guard = self
            .emit_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let count = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        if count % self.interval == 0 || count == self.total {
            self.reporter.report(count, self.total);
        }
        count
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::test_support::RecordingProgress;

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(3, 3), "3 \\ 3");
        assert_eq!(format_progress(100, 250), "100 \\ 250");
    }

    #[test]
    fn test_reports_at_interval_multiples_and_total() {
        let reporter = RecordingProgress::default();
        let counter = ProgressCounter::new(250, 100, &reporter);

        for _ in 0..250 {
            counter.complete_one();
        }

        assert_eq!(counter.completed(), 250);
        assert_eq!(
            reporter.lines(),
            vec![(100, 250), (200, 250), (250, 250)]
        );
    }

    #[test]
    fn test_total_on_a_multiple_is_reported_once() {
        let reporter = RecordingProgress::default();
        let counter = ProgressCounter::new(200, 100, &reporter);

        for _ in 0..200 {
            counter.complete_one();
        }

        assert_eq!(reporter.lines(), vec![(100, 200), (200, 200)]);
    }

    #[test]
    fn test_zero_interval_reports_every_completion() {
        let reporter = RecordingProgress::default();
        let counter = ProgressCounter::new(3, 0, &reporter);

        for _ in 0..3 {
            counter.complete_one();
        }

        assert_eq!(
            reporter.lines(),
            vec![(1, 3), (2, 3), (3, 3)]
        );
    }

    #[test]
    fn test_concurrent_completions_are_ordered() {
        let reporter = RecordingProgress::default();
        let counter = ProgressCounter::new(1000, 7, &reporter);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..125 {
                        counter.complete_one();
                    }
                });
            }
        });

        let counts: Vec<usize> = reporter.lines().iter().map(|&(c, _)| c).collect();
        let mut expected: Vec<usize> = (7..1000).step_by(7).collect();
        expected.push(1000);
        assert_eq!(counts, expected);
    }
}
