//! Course id extraction from a course landing page.

use scraper::{Html, Selector};

use crate::api::CourseApi;
use crate::config::parse_course_id;
use crate::error::Result;

/// Attribute on the page body carrying the numeric course id.
pub const COURSE_ID_ATTR: &str = "data-clp-course-id";

/// Read the course id attribute from the `<body>` of a course page.
pub fn extract_course_id(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("body[{}]", COURSE_ID_ATTR)).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|body| body.value().attr(COURSE_ID_ATTR))
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Fetch a course page and read its course id.
///
/// Returns `None` when the page carries no usable id.
pub async fn course_id_from_url<A: CourseApi + ?Sized>(api: &A, url: &str) -> Result<Option<u64>> {
    tracing::info!("Reading course id from {}", url);
    let html = api.course_page(url).await?;

    let Some(raw) = extract_course_id(&html) else {
        tracing::warn!("No {} attribute found on {}", COURSE_ID_ATTR, url);
        return Ok(None);
    };

    match parse_course_id(&raw) {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            tracing::warn!("Course page has an unusable id '{}': {}", raw, e);
            Ok(None)
        }
    }
}
