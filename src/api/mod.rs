//! Udemy API module.
//!
//! This module provides:
//! - HTTP client for the Udemy api-2.0 endpoints
//! - Access token handling
//! - API response types

pub mod auth;
pub mod client;
pub mod types;

pub use auth::Credential;
pub use client::{CourseApi, UdemyApi};
pub use types::*;
