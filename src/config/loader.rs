//! Configuration structures and loading logic.

use crate::api::client::API_BASE;
use crate::config::modes::CourseSelector;
use crate::download::session::DEFAULT_MAX_ATTEMPTS;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Account credentials configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Udemy access token (bearer token from the browser session).
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Numeric id of the course to download.
    #[serde(default)]
    pub course_id: Option<u64>,

    /// Course landing page URL; the id is read from the page.
    #[serde(default)]
    pub course_url: Option<String>,

    /// Video resolution label (360, 480, 720, 1080, ...).
    #[serde(default)]
    pub resolution: Option<String>,

    /// First lecture index to download (inclusive).
    #[serde(default)]
    pub start: Option<u32>,

    /// Last lecture index to download (inclusive).
    #[serde(default)]
    pub end: Option<u32>,

    /// Directory files are written to.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Failed resolution lookups allowed per run.
    #[serde(default = "default_attempts")]
    pub max_resolution_attempts: u32,

    /// Unknown course ids allowed before giving up.
    #[serde(default = "default_attempts")]
    pub max_course_lookup_attempts: u32,

    /// Timeout for API requests, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Re-download files that already exist.
    #[serde(default)]
    pub overwrite_existing: bool,

    /// Keep the `.part` file of a failed download instead of deleting it.
    #[serde(default)]
    pub keep_partial_files: bool,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            course_id: None,
            course_url: None,
            resolution: None,
            start: None,
            end: None,
            download_directory: None,
            max_resolution_attempts: DEFAULT_MAX_ATTEMPTS,
            max_course_lookup_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout_seconds: default_request_timeout(),
            overwrite_existing: false,
            keep_partial_files: false,
            show_progress: true,
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_api_base_url() -> String {
    API_BASE.to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Timeout applied to API requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.options.request_timeout_seconds)
    }

    /// How the course to download is chosen.
    pub fn course_selector(&self) -> CourseSelector {
        if let Some(id) = self.options.course_id {
            CourseSelector::Id(id)
        } else if let Some(url) = &self.options.course_url {
            CourseSelector::Url(url.clone())
        } else {
            CourseSelector::Catalog
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[account]
access_token = "abc"

[options]
resolution = "720"
start = 2
end = 4
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.account.access_token.as_deref(), Some("abc"));
        assert_eq!(config.options.resolution.as_deref(), Some("720"));
        assert_eq!(config.options.start, Some(2));
        assert_eq!(config.options.max_resolution_attempts, 3);
        assert!(config.options.show_progress);
        assert_eq!(config.options.api_base_url, API_BASE);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_course_selector_precedence() {
        let mut config = Config::default();
        assert_eq!(config.course_selector(), CourseSelector::Catalog);

        config.options.course_url = Some("https://www.udemy.com/course/go/".into());
        assert!(matches!(config.course_selector(), CourseSelector::Url(_)));

        config.options.course_id = Some(9);
        assert_eq!(config.course_selector(), CourseSelector::Id(9));
    }
}
