//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Flag value meaning "not supplied".
const FLAG_SENTINEL: &str = "false";

/// Udemy course downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "udemy-downloader",
    version,
    about = "Download lecture videos and files from your Udemy courses",
    long_about = "A CLI tool to download a range of lectures from a Udemy course.\n\n\
                  Values that are not given on the command line or in the config file \
                  are asked for interactively."
)]
pub struct Args {
    /// Udemy access token ("false" asks for it).
    #[arg(long = "access-token", env = "UDEMY_ACCESS_TOKEN")]
    pub access_token: Option<String>,

    /// Course page URL to read the course id from ("false" lists your courses instead).
    #[arg(long = "course-url")]
    pub course_url: Option<String>,

    /// Numeric course id.
    #[arg(long = "course-id")]
    pub course_id: Option<u64>,

    /// First lecture to download (inclusive, 0 asks).
    #[arg(long)]
    pub start: Option<u32>,

    /// Last lecture to download (inclusive, 0 asks).
    #[arg(long)]
    pub end: Option<u32>,

    /// Video resolution: 360, 480, 720, 1080 ("false" asks).
    #[arg(long)]
    pub resolution: Option<String>,

    /// Directory to write files to.
    #[arg(long = "download-location")]
    pub download_location: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Download files that already exist again.
    #[arg(long)]
    pub overwrite: bool,

    /// Keep partially written ".part" files after a failed download.
    #[arg(long)]
    pub keep_partial: bool,

    /// Hide download progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// Drop empty values and the "false" sentinel.
fn supplied(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != FLAG_SENTINEL)
}

/// Drop the 0 sentinel.
fn supplied_index(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v != 0)
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(token) = supplied(self.access_token) {
            config.account.access_token = Some(token);
        }

        if let Some(url) = supplied(self.course_url) {
            config.options.course_url = Some(url);
        }

        if let Some(id) = self.course_id {
            config.options.course_id = Some(id);
        }

        if let Some(start) = supplied_index(self.start) {
            config.options.start = Some(start);
        }

        if let Some(end) = supplied_index(self.end) {
            config.options.end = Some(end);
        }

        if let Some(resolution) = supplied(self.resolution) {
            config.options.resolution = Some(resolution);
        }

        if let Some(dir) = supplied(self.download_location) {
            config.options.download_directory = Some(PathBuf::from(dir));
        }

        // Boolean flags (only override if set to non-default)
        if self.overwrite {
            config.options.overwrite_existing = true;
        }

        if self.keep_partial {
            config.options.keep_partial_files = true;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
