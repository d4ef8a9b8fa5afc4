//! Progress reporting module

use bitok_core::RunStats;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner counting records as the pipeline consumes them
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Show the spinner; the record total is unknown up front
    pub fn start(&mut self, input: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {pos} records ({per_sec}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(format!("from {input}"));
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update after one record
    pub fn record_processed(&self, stats: &RunStats) {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(stats.records_read);
        }
    }

    /// Finish with a summary line
    pub fn finish(&self, stats: &RunStats) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "done: {} written, {} skipped",
                stats.records_written, stats.records_skipped
            ));
        }
    }

    /// Stop the spinner after a failure
    pub fn abandon(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.abandon_with_message("failed");
        }
    }

    /// Whether a spinner is shown
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }
}
