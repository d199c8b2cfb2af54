//! Progress bar utilities.

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};

use crate::download::progress::{DownloadProgress, ProgressSink};

/// Create a progress bar for downloads with a known size.
pub fn create_download_bar(total: u64, label: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("   - {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar.set_message(label.to_string());
    bar
}

/// Create a spinner for downloads of unknown size.
pub fn create_download_spinner(label: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("   - {spinner:.green} {msg} {bytes} ({bytes_per_sec})")
            .unwrap(),
    );
    spinner.set_message(label.to_string());
    spinner
}

/// Progress sink drawing an indicatif bar.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    pub fn new(total: Option<u64>, label: &str) -> Self {
        let bar = match total {
            Some(total) => create_download_bar(total, label),
            None => create_download_spinner(label),
        };
        Self { bar }
    }
}

impl ProgressSink for BarSink {
    fn update(&mut self, progress: &DownloadProgress) {
        self.bar.set_position(progress.bytes_transferred);
    }

    fn finish(&mut self, progress: &DownloadProgress) {
        self.bar.set_position(progress.bytes_transferred);
        self.bar.finish_and_clear();
        println!(
            "   - Download Finished : {} ({})",
            progress.label,
            HumanBytes(progress.bytes_transferred)
        );
    }
}
