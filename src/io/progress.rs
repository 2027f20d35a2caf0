//! Batch progress display for generation jobs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Jobs: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks completed and failed jobs across worker threads
///
/// Safe to share by reference between threads; a hidden tracker still counts.
pub struct BatchProgress {
    bar: ProgressBar,
    total: usize,
    failed: AtomicUsize,
}

impl BatchProgress {
    /// Visible progress bar for `total` jobs
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self {
            bar,
            total,
            failed: AtomicUsize::new(0),
        }
    }

    /// Tracker that draws nothing
    pub fn hidden(total: usize) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            total,
            failed: AtomicUsize::new(0),
        }
    }

    /// Record one finished job
    pub fn record(&self, succeeded: bool) {
        if !succeeded {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        self.bar.inc(1);
    }

    /// Jobs recorded as failed so far
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    /// Total jobs in the batch
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Close the bar with a one-line summary
    pub fn finish(&self) {
        let failed = self.failed();
        let summary = if failed == 0 {
            "all jobs completed".to_string()
        } else {
            format!("{failed} out of {} jobs failed", self.total)
        };
        self.bar.finish_with_message(summary);
    }
}
