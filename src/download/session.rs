//! Per-run session state.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};

/// Default number of failed resolution lookups before the run stops.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Inclusive lecture range, 1-based display indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LectureRange {
    pub start: u32,
    pub end: u32,
}

impl LectureRange {
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start == 0 {
            return Err(Error::ConfigValidation {
                field: "start".to_string(),
                message: "Lecture indices start at 1".to_string(),
            });
        }
        if start > end {
            return Err(Error::ConfigValidation {
                field: "end".to_string(),
                message: format!("End ({}) is before start ({})", end, start),
            });
        }
        Ok(Self { start, end })
    }
}

/// Mutable state of one download run, owned by the caller and passed down by
/// exclusive reference.
#[derive(Debug)]
pub struct Session {
    pub course_id: Option<u64>,
    pub resolution: Option<String>,
    pub range: Option<LectureRange>,
    pub download_dir: PathBuf,

    // Resolution fallback budget
    pub max_attempts: u32,
    pub attempts: u32,

    // Not-found course id budget
    pub max_course_lookups: u32,

    pub overwrite_existing: bool,

    // Asset ids handled this run
    pub(crate) seen_assets: HashSet<u64>,

    // Statistics
    pub downloaded: u64,
    pub skipped: u64,
    pub failed: u64,
    pub bytes_downloaded: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            course_id: None,
            resolution: None,
            range: None,
            download_dir: PathBuf::from("."),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempts: 0,
            max_course_lookups: DEFAULT_MAX_ATTEMPTS,
            overwrite_existing: false,
            seen_assets: HashSet::new(),
            downloaded: 0,
            skipped: 0,
            failed: 0,
            bytes_downloaded: 0,
        }
    }
}

impl Session {
    /// Build a session from a merged and validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let options = &config.options;

        let range = match (options.start, options.end) {
            (Some(start), Some(end)) => Some(LectureRange::new(start, end)?),
            _ => None,
        };

        Ok(Self {
            course_id: options.course_id,
            resolution: options.resolution.clone(),
            range,
            download_dir: config.download_directory(),
            max_attempts: options.max_resolution_attempts,
            max_course_lookups: options.max_course_lookup_attempts,
            overwrite_existing: options.overwrite_existing,
            ..Default::default()
        })
    }

    /// Record one failed resolution lookup.
    ///
    /// Fails with `MaxAttemptsExceeded` once the budget is used up.
    pub fn consume_attempt(&mut self) -> Result<()> {
        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            return Err(Error::MaxAttemptsExceeded(self.attempts));
        }
        Ok(())
    }

    /// Attempts left before the run stops.
    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    /// Check if an asset has already been handled this run.
    pub fn is_asset_seen(&self, asset_id: u64) -> bool {
        self.seen_assets.contains(&asset_id)
    }

    /// Mark an asset as handled.
    pub fn mark_asset_seen(&mut self, asset_id: u64) {
        self.seen_assets.insert(asset_id);
    }

    pub fn record_download(&mut self, bytes: u64) {
        self.downloaded += 1;
        self.bytes_downloaded += bytes;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_validation() {
        assert!(LectureRange::new(1, 1).is_ok());
        assert!(LectureRange::new(0, 5).is_err());
        assert!(LectureRange::new(6, 5).is_err());
    }

    #[test]
    fn test_attempt_budget() {
        let mut session = Session::default();
        assert_eq!(session.remaining_attempts(), 3);
        assert!(session.consume_attempt().is_ok());
        assert!(session.consume_attempt().is_ok());
        assert!(matches!(
            session.consume_attempt(),
            Err(Error::MaxAttemptsExceeded(3))
        ));
        assert_eq!(session.attempts, 3);
        assert_eq!(session.remaining_attempts(), 0);
    }

    #[test]
    fn test_seen_assets() {
        let mut session = Session::default();
        assert!(!session.is_asset_seen(7));
        session.mark_asset_seen(7);
        assert!(session.is_asset_seen(7));
    }
}
