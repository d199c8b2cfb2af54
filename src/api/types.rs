//! API response type definitions.

use serde::Deserialize;

/// Paginated list wrapper used by the api-2.0 endpoints.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A subscribed course.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// One entry of a course's curriculum (chapter, lecture, quiz, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct CurriculumEntry {
    #[serde(rename = "_class", default)]
    pub class: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub object_index: u32,
    #[serde(default)]
    pub asset: Option<AssetInfo>,
}

/// Asset metadata nested inside a lecture.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInfo {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub asset_type: String,
    #[serde(default)]
    pub filename: String,
}

/// Stream metadata for a single asset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetStreams {
    #[serde(default)]
    pub asset_type: String,
    #[serde(default)]
    pub stream_urls: Option<StreamUrls>,
    #[serde(default)]
    pub download_urls: Option<DownloadUrls>,
}

impl AssetStreams {
    /// Video variants in server order.
    pub fn videos(&self) -> &[StreamVariant] {
        self.stream_urls
            .as_ref()
            .map(|s| s.video.as_slice())
            .unwrap_or(&[])
    }

    /// Direct file links in server order.
    pub fn files(&self) -> &[StreamVariant] {
        self.download_urls
            .as_ref()
            .map(|d| d.file.as_slice())
            .unwrap_or(&[])
    }
}

/// `stream_urls` object of an asset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamUrls {
    #[serde(rename = "Video", default)]
    pub video: Vec<StreamVariant>,
}

/// `download_urls` object of an asset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadUrls {
    #[serde(rename = "File", default)]
    pub file: Vec<StreamVariant>,
}

/// A playable variant of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamVariant {
    #[serde(rename = "file")]
    pub url: String,
    #[serde(rename = "type", default)]
    pub container_type: String,
    #[serde(rename = "label", default)]
    pub resolution_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_curriculum_page() {
        let json = r#"{
            "count": 3,
            "next": null,
            "results": [
                {"_class": "chapter", "id": 10, "title": "Getting Started", "object_index": 1},
                {"_class": "lecture", "id": 11, "title": "Intro", "object_index": 1,
                 "asset": {"_class": "asset", "id": 501, "asset_type": "Video", "filename": "intro.mp4"},
                 "supplementary_assets": []},
                {"_class": "quiz", "id": 12, "title": "Check", "object_index": 1}
            ]
        }"#;

        let page: Page<CurriculumEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, Some(3));
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[1].class, "lecture");
        let asset = page.results[1].asset.as_ref().unwrap();
        assert_eq!(asset.id, 501);
        assert_eq!(asset.asset_type, "Video");
        assert!(page.results[0].asset.is_none());
    }

    #[test]
    fn test_parse_asset_streams() {
        let json = r#"{
            "_class": "asset",
            "id": 501,
            "asset_type": "Video",
            "stream_urls": {"Video": [
                {"type": "video/mp4", "label": "360", "file": "https://cdn/360.mp4"},
                {"type": "video/mp4", "label": "720", "file": "https://cdn/720.mp4"}
            ]},
            "download_urls": null
        }"#;

        let streams: AssetStreams = serde_json::from_str(json).unwrap();
        assert_eq!(streams.videos().len(), 2);
        assert_eq!(streams.videos()[1].resolution_label, "720");
        assert_eq!(streams.videos()[1].container_type, "video/mp4");
        assert!(streams.files().is_empty());
    }
}
