/// Progress reporting for long-running directory runs
///
/// Reports through tracing whenever the processed share crosses a new
/// tenth of a percent, so large trees log at most 1000 progress lines.
use std::time::Instant;
use tracing::info;

pub struct ProgressReporter {
    start_time: Instant,
    total_files: usize,
    last_milestone: Option<usize>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(total_files: usize) -> Self {
        Self {
            start_time: Instant::now(),
            total_files,
            last_milestone: None,
        }
    }

    /// Per-mille milestone for `processed` files
    pub fn milestone(&self, processed: usize) -> usize {
        if self.total_files == 0 {
            return 1000;
        }
        processed.min(self.total_files) * 1000 / self.total_files
    }

    /// Report progress; returns true when a line was logged
    pub fn report(&mut self, processed: usize) -> bool {
        let current = self.milestone(processed);
        if self.last_milestone.is_some_and(|last| current <= last) {
            return false;
        }
        self.last_milestone = Some(current);

        info!(
            "Progress: {:.1}% ({}/{} files)",
            current as f64 / 10.0,
            processed,
            self.total_files
        );
        true
    }

    /// Report completion
    pub fn complete(&self, total_classes: usize, failed: usize) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let file_rate = if elapsed > 0.0 {
            self.total_files as f64 / elapsed
        } else {
            0.0
        };

        info!(
            "✅ Extraction complete: {} classes from {} files ({} failed) in {:.2}s ({:.0} files/sec)",
            total_classes, self.total_files, failed, elapsed, file_rate
        );
    }
}
