//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::course::Asset;
use crate::error::Result;
use crate::fs::naming::asset_filename;

/// Destination path of an asset inside the download directory.
pub fn asset_path(download_dir: &Path, asset: &Asset) -> Result<PathBuf> {
    Ok(download_dir.join(asset_filename(asset)?))
}

/// Suffix of a file still being written.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Path an asset is streamed to before it is complete.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
