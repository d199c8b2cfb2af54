//! Course catalog and curriculum resolution.

use crate::api::{CourseApi, Course};
use crate::config::parse_course_id;
use crate::course::asset::{AssetMap, CurriculumItem, ItemKind};
use crate::download::Session;
use crate::error::{Error, Result};
use crate::output::{print_course_list, print_error, print_info, print_lecture_list};
use crate::prompt::Prompter;

/// Fetch the subscribed courses and print them for selection.
pub async fn list_courses<A: CourseApi + ?Sized>(api: &A) -> Result<Vec<Course>> {
    print_info("Fetching courses...");
    let courses = api.subscribed_courses().await?;
    tracing::debug!("Fetched {} courses", courses.len());

    print_course_list(&courses);
    Ok(courses)
}

/// Keep only lectures with a Video or File asset, keyed by display index.
pub fn project_curriculum(items: impl IntoIterator<Item = CurriculumItem>) -> AssetMap {
    let mut assets = AssetMap::new();

    for item in items {
        if item.kind != ItemKind::Lecture {
            continue;
        }

        let Some(asset) = item.asset else {
            continue;
        };

        if !asset.asset_type.is_downloadable() || asset.id == 0 {
            continue;
        }

        if let Some(previous) = assets.insert(asset) {
            tracing::warn!(
                "Lecture index {} appears twice, keeping the later one (dropped asset {})",
                previous.display_index,
                previous.id
            );
        }
    }

    assets
}

/// Fetch the curriculum of the session's course and build its asset map.
///
/// Unknown course ids are re-asked from the prompter, up to the session's
/// lookup budget.
pub async fn fetch_assets<A, P>(api: &A, prompter: &mut P, session: &mut Session) -> Result<AssetMap>
where
    A: CourseApi + ?Sized,
    P: Prompter + ?Sized,
{
    let mut lookups = 0u32;

    loop {
        let course_id = match session.course_id {
            Some(id) => Some(id),
            None => {
                let raw = prompter.course_id()?;
                match parse_course_id(&raw) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        print_error(&e.to_string());
                        None
                    }
                }
            }
        };

        if let Some(course_id) = course_id {
            print_info("Fetching course lectures...");
            match api.curriculum(course_id).await {
                Ok(items) => {
                    session.course_id = Some(course_id);
                    let assets = project_curriculum(items);
                    tracing::info!(
                        "Course {} has {} downloadable lectures",
                        course_id,
                        assets.len()
                    );
                    print_lecture_list(&assets);
                    return Ok(assets);
                }
                Err(Error::CourseNotFound(id)) => {
                    print_error(&format!("Invalid course ID: {}", id));
                }
                Err(e) => return Err(e),
            }
        }

        session.course_id = None;
        lookups += 1;
        if lookups >= session.max_course_lookups {
            return Err(Error::MaxAttemptsExceeded(lookups));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::api::AssetStreams;
    use crate::course::asset::{Asset, AssetType};
    use crate::prompt::ScriptedPrompter;

    fn item(kind: ItemKind, index: u32, asset_type: Option<AssetType>) -> CurriculumItem {
        CurriculumItem {
            kind,
            display_index: index,
            title: format!("Item {}", index),
            asset: asset_type.map(|t| Asset {
                id: 100 + index as u64,
                asset_type: t,
                filename: format!("f{}.mp4", index),
                title: format!("Item {}", index),
                display_index: index,
            }),
        }
    }

    /// Curriculum endpoint knowing a single valid course id.
    struct FakeCatalog {
        valid_id: u64,
        requested: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl CourseApi for FakeCatalog {
        async fn verify_credential(&self) -> Result<()> {
            Ok(())
        }

        async fn subscribed_courses(&self) -> Result<Vec<Course>> {
            Ok(vec![Course {
                id: self.valid_id,
                title: "Learn Go".into(),
                url: None,
            }])
        }

        async fn curriculum(&self, course_id: u64) -> Result<Vec<CurriculumItem>> {
            self.requested.lock().unwrap().push(course_id);
            if course_id != self.valid_id {
                return Err(Error::CourseNotFound(course_id.to_string()));
            }
            Ok(vec![
                item(ItemKind::Chapter, 1, None),
                item(ItemKind::Lecture, 1, Some(AssetType::Video)),
                item(ItemKind::Lecture, 2, Some(AssetType::File)),
            ])
        }

        async fn asset_streams(&self, _asset_id: u64) -> Result<AssetStreams> {
            Ok(AssetStreams::default())
        }

        async fn course_page(&self, _url: &str) -> Result<String> {
            Ok(String::new())
        }
    }

    fn fake(valid_id: u64) -> FakeCatalog {
        FakeCatalog {
            valid_id,
            requested: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_projection_keeps_only_downloadable_lectures() {
        let items = vec![
            item(ItemKind::Chapter, 1, None),
            item(ItemKind::Lecture, 1, Some(AssetType::Video)),
            item(ItemKind::Lecture, 2, Some(AssetType::Other)),
            item(ItemKind::Lecture, 3, Some(AssetType::File)),
            item(ItemKind::Other, 4, Some(AssetType::Video)),
            item(ItemKind::Lecture, 5, None),
        ];

        let assets = project_curriculum(items);
        let keys: Vec<u32> = assets.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 3]);
        for (index, asset) in assets.iter() {
            assert_eq!(asset.display_index, *index);
            assert!(asset.asset_type.is_downloadable());
        }
    }

    #[test]
    fn test_projection_tolerates_sparse_unsorted_indices() {
        let items = vec![
            item(ItemKind::Lecture, 40, Some(AssetType::Video)),
            item(ItemKind::Lecture, 2, Some(AssetType::Video)),
            item(ItemKind::Lecture, 1_000_000, Some(AssetType::File)),
        ];

        let assets = project_curriculum(items);
        assert_eq!(assets.len(), 3);
        assert_eq!(assets.max_index(), Some(1_000_000));
        assert_eq!(assets.get(40).unwrap().id, 140);
    }

    #[tokio::test]
    async fn test_not_found_reprompts_with_new_id() {
        let api = fake(1234);
        let mut prompter = ScriptedPrompter::default();
        prompter.course_ids = VecDeque::from(vec!["1234".to_string()]);
        let mut session = Session {
            course_id: Some(999),
            ..Default::default()
        };

        let assets = fetch_assets(&api, &mut prompter, &mut session).await.unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(*api.requested.lock().unwrap(), vec![999, 1234]);
        assert_eq!(prompter.course_id_prompts, 1);
        assert_eq!(session.course_id, Some(1234));
    }

    #[tokio::test]
    async fn test_persistent_not_found_is_capped() {
        let api = fake(1234);
        let mut prompter = ScriptedPrompter::default();
        prompter.course_ids = VecDeque::from(vec!["999".to_string(); 10]);
        let mut session = Session {
            course_id: Some(999),
            ..Default::default()
        };

        let err = fetch_assets(&api, &mut prompter, &mut session)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MaxAttemptsExceeded(3)));
        assert_eq!(api.requested.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unparseable_prompt_answer_counts_as_lookup() {
        let api = fake(1234);
        let mut prompter = ScriptedPrompter::default();
        prompter.course_ids = VecDeque::from(vec!["abc".to_string(), "1234".to_string()]);
        let mut session = Session::default();

        let assets = fetch_assets(&api, &mut prompter, &mut session).await.unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(*api.requested.lock().unwrap(), vec![1234]);
    }
}
