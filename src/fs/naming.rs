//! Filename generation and sanitization.

use std::path::Path;

use crate::course::{Asset, AssetType};
use crate::error::{Error, Result};

/// Extension used for every video asset.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Make a lecture title safe to use as a file name.
///
/// Separators and characters Windows rejects are replaced with `_`; names that
/// would resolve to the current or parent directory are rejected.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let sanitized = sanitized.trim().trim_end_matches('.').trim_end().to_string();

    // Reject empty or whitespace-only names
    if sanitized.is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Extension for an asset's file: `mp4` for videos, the source extension otherwise.
pub fn asset_extension(asset: &Asset) -> Option<String> {
    match asset.asset_type {
        AssetType::Video => Some(VIDEO_EXTENSION.to_string()),
        _ => Path::new(&asset.filename)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(|e| e.to_string()),
    }
}

/// File name for an asset: `{display_index}. {title}.{ext}`.
pub fn asset_filename(asset: &Asset) -> Result<String> {
    let stem = format!("{}. {}", asset.display_index, asset.title);
    let name = match asset_extension(asset) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    };
    sanitize_filename(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(asset_type: AssetType, title: &str, filename: &str) -> Asset {
        Asset {
            id: 1,
            asset_type,
            filename: filename.to_string(),
            title: title.to_string(),
            display_index: 7,
        }
    }

    #[test]
    fn test_video_filename() {
        let a = asset(AssetType::Video, "Intro to Go", "getting_started.mov");
        assert_eq!(asset_filename(&a).unwrap(), "7. Intro to Go.mp4");
    }

    #[test]
    fn test_file_keeps_source_extension() {
        let a = asset(AssetType::File, "Cheat Sheet", "go-cheatsheet.pdf");
        assert_eq!(asset_filename(&a).unwrap(), "7. Cheat Sheet.pdf");

        let bare = asset(AssetType::File, "Notes", "README");
        assert_eq!(asset_filename(&bare).unwrap(), "7. Notes");
    }

    #[test]
    fn test_title_with_separators() {
        let a = asset(AssetType::Video, "Input/Output: Part 1?", "x.mp4");
        assert_eq!(asset_filename(&a).unwrap(), "7. Input_Output_ Part 1_.mp4");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("normal.txt").unwrap(), "normal.txt");
        assert_eq!(sanitize_filename("Wait for it...").unwrap(), "Wait for it");
        assert_eq!(sanitize_filename("../etc/passwd").unwrap(), ".._etc_passwd");
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("file\0name").is_err());
        assert!(sanitize_filename("   ").is_err());
    }
}
