//! Udemy Downloader - batch download lectures from Udemy courses.
//!
//! This library provides functionality for downloading the video and file
//! assets of a contiguous range of lectures from a course the account is
//! subscribed to.
//!
//! # Features
//!
//! - List subscribed courses
//! - Read a course id from its landing page
//! - Download a lecture range at a chosen resolution
//! - Interactive fallback when a resolution is not available
//! - Streaming writes with progress sampling
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use udemy_downloader::{
//!     api::Credential, course::fetch_assets, download::download_range, prompt::ConsolePrompter,
//!     Config, HttpDownloader, Session, UdemyApi,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let token = config.account.access_token.clone().unwrap_or_default();
//!     let api = UdemyApi::new(Credential::new(&token)?, config.request_timeout())?;
//!
//!     let mut prompter = ConsolePrompter::new();
//!     let mut session = Session::from_config(&config)?;
//!     let assets = fetch_assets(&api, &mut prompter, &mut session).await?;
//!
//!     let downloader = HttpDownloader::new(api.http_client(), config.request_timeout());
//!     download_range(&api, &downloader, &mut prompter, &mut session, &assets).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod course;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;
pub mod prompt;

// Re-exports for convenience
pub use api::{CourseApi, Credential, UdemyApi};
pub use config::{Config, CourseSelector};
pub use course::{Asset, AssetMap, AssetType};
pub use download::{download_range, AssetDownloader, HttpDownloader, Session};
pub use error::{Error, Result};
