//! Configuration module for the udemy-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Course selection modes
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig};
pub use modes::CourseSelector;
pub use validation::{parse_course_id, validate_config};
