//! Download module.
//!
//! This module provides:
//! - Session state and attempt budgets
//! - Asset link resolution with resolution fallback
//! - Streaming downloads with progress sampling
//! - The range driver tying them together

pub mod file;
pub mod progress;
pub mod range;
pub mod resolver;
pub mod session;

pub use file::{copy_stream, AssetDownloader, HttpDownloader};
pub use progress::{DownloadProgress, ProgressCounter, ProgressSampler, ProgressSink};
pub use range::{download_range, DriverState};
pub use resolver::{resolve_link, select_link, select_variant};
pub use session::{LectureRange, Session};
