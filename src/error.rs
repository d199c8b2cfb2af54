//! Error types for the udemy-downloader application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    // Link resolution errors
    #[error("No download link for resolution {resolution} (asset {asset_id})")]
    NoMatchingResolution { asset_id: u64, resolution: String },

    #[error("Max attempts exceeded ({0}), please try again")]
    MaxAttemptsExceeded(u32),

    // Download errors
    #[error("Error creating file {}: {source}", path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Stream error: {0}")]
    Stream(String),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // Interactive input errors
    #[error("Prompt failed: {0}")]
    Prompt(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Whether this error ends the whole run rather than just the current asset.
    pub fn aborts_run(&self) -> bool {
        matches!(
            self,
            Error::Authentication(_)
                | Error::MaxAttemptsExceeded(_)
                | Error::FileCreate { .. }
                | Error::Prompt(_)
        )
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
