//! Course module: curriculum projection and course selection.

pub mod asset;
pub mod catalog;
pub mod page;

pub use asset::{Asset, AssetMap, AssetType, CurriculumItem, ItemKind};
pub use catalog::{fetch_assets, list_courses, project_curriculum};
pub use page::{course_id_from_url, extract_course_id};
