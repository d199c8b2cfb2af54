//! Curriculum items and downloadable assets.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::ops::RangeInclusive;

use crate::api::types::CurriculumEntry;

/// Kind of a curriculum entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Chapter,
    Lecture,
    Other,
}

impl ItemKind {
    /// Map the API `_class` value.
    pub fn from_class(class: &str) -> Self {
        match class {
            "chapter" => ItemKind::Chapter,
            "lecture" => ItemKind::Lecture,
            _ => ItemKind::Other,
        }
    }
}

/// Type of an asset attached to a lecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Video,
    File,
    Other,
}

impl AssetType {
    /// Map the API `asset_type` value.
    pub fn from_api(value: &str) -> Self {
        match value {
            "Video" => AssetType::Video,
            "File" => AssetType::File,
            _ => AssetType::Other,
        }
    }

    /// Whether assets of this type end up in the download list.
    pub fn is_downloadable(&self) -> bool {
        matches!(self, AssetType::Video | AssetType::File)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Video => write!(f, "Video"),
            AssetType::File => write!(f, "File"),
            AssetType::Other => write!(f, "Other"),
        }
    }
}

/// A downloadable unit attached to a lecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: u64,
    pub asset_type: AssetType,
    /// Source filename as reported by the API.
    pub filename: String,
    /// Title of the owning lecture.
    pub title: String,
    pub display_index: u32,
}

/// One entry of a course curriculum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumItem {
    pub kind: ItemKind,
    pub display_index: u32,
    pub title: String,
    pub asset: Option<Asset>,
}

impl From<CurriculumEntry> for CurriculumItem {
    fn from(entry: CurriculumEntry) -> Self {
        let kind = ItemKind::from_class(&entry.class);
        let asset = entry.asset.map(|info| Asset {
            id: info.id,
            asset_type: AssetType::from_api(&info.asset_type),
            filename: info.filename,
            title: entry.title.clone(),
            display_index: entry.object_index,
        });

        Self {
            kind,
            display_index: entry.object_index,
            title: entry.title,
            asset,
        }
    }
}

/// Downloadable assets keyed by lecture display index.
///
/// A key is present only for lectures carrying a Video or File asset.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    slots: BTreeMap<u32, Asset>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an asset at its display index, replacing any earlier one.
    pub fn insert(&mut self, asset: Asset) -> Option<Asset> {
        self.slots.insert(asset.display_index, asset)
    }

    pub fn get(&self, index: u32) -> Option<&Asset> {
        self.slots.get(&index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Highest populated index.
    pub fn max_index(&self) -> Option<u32> {
        self.slots.keys().next_back().copied()
    }

    /// Populated slots within an inclusive index range, in ascending order.
    pub fn range(&self, indices: RangeInclusive<u32>) -> btree_map::Range<'_, u32, Asset> {
        // BTreeMap::range panics on an inverted range
        if indices.start() > indices.end() {
            return self.slots.range(..0);
        }
        self.slots.range(indices)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, u32, Asset> {
        self.slots.iter()
    }
}
