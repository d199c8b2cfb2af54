//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename generation and sanitization

pub mod naming;
pub mod paths;

pub use naming::{asset_extension, asset_filename, sanitize_filename};
pub use paths::{asset_path, ensure_dir, partial_path};
