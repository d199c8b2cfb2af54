//! Course selection modes.

use std::fmt;

/// How the course to download is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseSelector {
    /// List subscribed courses and ask for an id.
    Catalog,
    /// Use a known course id.
    Id(u64),
    /// Read the course id from a course landing page.
    Url(String),
}

impl CourseSelector {
    /// Whether the subscribed-course listing should be shown.
    pub fn lists_catalog(&self) -> bool {
        matches!(self, CourseSelector::Catalog)
    }
}

impl fmt::Display for CourseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseSelector::Catalog => write!(f, "catalog"),
            CourseSelector::Id(id) => write!(f, "course id {}", id),
            CourseSelector::Url(url) => write!(f, "course page {}", url),
        }
    }
}
