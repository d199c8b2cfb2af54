//! Asset link resolution with resolution fallback.

use crate::api::{AssetStreams, CourseApi, StreamVariant};
use crate::course::{Asset, AssetType};
use crate::download::session::Session;
use crate::error::{Error, Result};
use crate::output::print_error;
use crate::prompt::{ask_resolution, Prompter};

/// First variant whose label equals `resolution`, in server order.
pub fn select_variant<'a>(variants: &'a [StreamVariant], resolution: &str) -> Option<&'a StreamVariant> {
    variants.iter().find(|v| v.resolution_label == resolution)
}

/// Pick the URL to download for an asset from its stream info.
///
/// Videos match on the resolution label; files use their first direct link.
pub fn select_link(streams: &AssetStreams, asset: &Asset, resolution: &str) -> Result<String> {
    let variant = match asset.asset_type {
        AssetType::Video => select_variant(streams.videos(), resolution),
        _ => streams.files().first(),
    };

    variant
        .map(|v| v.url.clone())
        .ok_or_else(|| Error::NoMatchingResolution {
            asset_id: asset.id,
            resolution: resolution.to_string(),
        })
}

/// Resolve the download URL of an asset.
///
/// Each resolution miss consumes one attempt from the session budget and asks
/// for a new resolution, which then applies to the rest of the run. Running
/// out of attempts is fatal.
pub async fn resolve_link<A, P>(
    api: &A,
    prompter: &mut P,
    session: &mut Session,
    asset: &Asset,
) -> Result<String>
where
    A: CourseApi + ?Sized,
    P: Prompter + ?Sized,
{
    loop {
        let resolution = match &session.resolution {
            Some(resolution) => resolution.clone(),
            None => {
                let resolution = ask_resolution(prompter)?;
                session.resolution = Some(resolution.clone());
                resolution
            }
        };

        let streams = api.asset_streams(asset.id).await?;

        match select_link(&streams, asset, &resolution) {
            Ok(url) => return Ok(url),
            Err(Error::NoMatchingResolution { .. }) if asset.asset_type != AssetType::Video => {
                return Err(Error::Download(format!(
                    "No download link available for {}",
                    asset.title
                )));
            }
            Err(Error::NoMatchingResolution { .. }) => {
                print_error(&format!(
                    "Don't have any valid download link for resolution {}, try with different resolution.",
                    resolution
                ));
                tracing::debug!(
                    "Available resolutions for asset {}: {:?}",
                    asset.id,
                    streams
                        .videos()
                        .iter()
                        .map(|v| v.resolution_label.as_str())
                        .collect::<Vec<_>>()
                );

                session.consume_attempt()?;

                session.resolution = Some(ask_resolution(prompter)?);
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::api::{Course, StreamUrls, DownloadUrls};
    use crate::course::CurriculumItem;
    use crate::prompt::ScriptedPrompter;

    fn variant(label: &str, url: &str) -> StreamVariant {
        StreamVariant {
            url: url.to_string(),
            container_type: "video/mp4".to_string(),
            resolution_label: label.to_string(),
        }
    }

    fn asset(asset_type: AssetType) -> Asset {
        Asset {
            id: 77,
            asset_type,
            filename: "x.pdf".into(),
            title: "Lecture".into(),
            display_index: 1,
        }
    }

    /// Stream endpoint returning fixed variants and counting calls.
    struct FakeStreams {
        streams: AssetStreams,
        calls: AtomicUsize,
    }

    impl FakeStreams {
        fn videos(variants: Vec<StreamVariant>) -> Self {
            Self {
                streams: AssetStreams {
                    asset_type: "Video".into(),
                    stream_urls: Some(StreamUrls { video: variants }),
                    download_urls: None,
                },
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CourseApi for FakeStreams {
        async fn verify_credential(&self) -> Result<()> {
            Ok(())
        }

        async fn subscribed_courses(&self) -> Result<Vec<Course>> {
            Ok(Vec::new())
        }

        async fn curriculum(&self, _course_id: u64) -> Result<Vec<CurriculumItem>> {
            Ok(Vec::new())
        }

        async fn asset_streams(&self, _asset_id: u64) -> Result<AssetStreams> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.streams.clone())
        }

        async fn course_page(&self, _url: &str) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_select_first_exact_match() {
        let variants = vec![
            variant("480", "a"),
            variant("720", "b"),
            variant("720", "c"),
        ];
        assert_eq!(select_variant(&variants, "720").unwrap().url, "b");
        assert!(select_variant(&variants, "1080").is_none());
        assert!(select_variant(&variants, "72").is_none());
    }

    #[test]
    fn test_file_asset_uses_download_link() {
        let streams = AssetStreams {
            asset_type: "File".into(),
            stream_urls: None,
            download_urls: Some(DownloadUrls {
                file: vec![variant("download", "https://cdn/slides.pdf")],
            }),
        };
        let link = select_link(&streams, &asset(AssetType::File), "720").unwrap();
        assert_eq!(link, "https://cdn/slides.pdf");
    }

    #[tokio::test]
    async fn test_resolve_with_session_resolution() {
        let api = FakeStreams::videos(vec![variant("360", "low"), variant("720", "hd")]);
        let mut prompter = ScriptedPrompter::default();
        let mut session = Session {
            resolution: Some("720".into()),
            ..Default::default()
        };

        let url = resolve_link(&api, &mut prompter, &mut session, &asset(AssetType::Video))
            .await
            .unwrap();

        assert_eq!(url, "hd");
        assert_eq!(session.attempts, 0);
        assert_eq!(prompter.resolution_prompts, 0);
    }

    #[tokio::test]
    async fn test_fallback_resolution_sticks() {
        let api = FakeStreams::videos(vec![variant("360", "low"), variant("720", "hd")]);
        let mut prompter = ScriptedPrompter::default();
        prompter.resolutions = VecDeque::from(vec!["360".to_string()]);
        let mut session = Session {
            resolution: Some("1080".into()),
            ..Default::default()
        };

        let url = resolve_link(&api, &mut prompter, &mut session, &asset(AssetType::Video))
            .await
            .unwrap();

        assert_eq!(url, "low");
        assert_eq!(session.attempts, 1);
        assert_eq!(session.resolution.as_deref(), Some("360"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_attempts_increment_once_per_miss_until_fatal() {
        let api = FakeStreams::videos(vec![variant("360", "low")]);
        let mut prompter = ScriptedPrompter::default();
        prompter.resolutions =
            VecDeque::from(vec!["480".to_string(), "720".to_string(), "1080".to_string()]);
        let mut session = Session {
            resolution: Some("144".into()),
            ..Default::default()
        };

        let err = resolve_link(&api, &mut prompter, &mut session, &asset(AssetType::Video))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MaxAttemptsExceeded(3)));
        assert!(err.aborts_run());
        assert_eq!(session.attempts, 3);
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);
        assert_eq!(prompter.resolution_prompts, 2);
    }

    #[tokio::test]
    async fn test_malformed_fallback_label_costs_no_attempt() {
        let api = FakeStreams::videos(vec![variant("360", "low")]);
        let mut prompter = ScriptedPrompter::default();
        prompter.resolutions = VecDeque::from(vec!["36O!".to_string(), "360".to_string()]);
        let mut session = Session {
            resolution: Some("1080".into()),
            ..Default::default()
        };

        let url = resolve_link(&api, &mut prompter, &mut session, &asset(AssetType::Video))
            .await
            .unwrap();

        assert_eq!(url, "low");
        assert_eq!(session.attempts, 1);
        assert_eq!(prompter.resolution_prompts, 2);
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_resolution_is_prompted_first() {
        let api = FakeStreams::videos(vec![variant("480", "sd")]);
        let mut prompter = ScriptedPrompter::default();
        prompter.resolutions = VecDeque::from(vec!["480".to_string()]);
        let mut session = Session::default();

        let url = resolve_link(&api, &mut prompter, &mut session, &asset(AssetType::Video))
            .await
            .unwrap();

        assert_eq!(url, "sd");
        assert_eq!(session.attempts, 0);
    }

    #[tokio::test]
    async fn test_file_without_link_is_not_a_resolution_miss() {
        let api = FakeStreams {
            streams: AssetStreams::default(),
            calls: AtomicUsize::new(0),
        };
        let mut prompter = ScriptedPrompter::default();
        let mut session = Session {
            resolution: Some("720".into()),
            ..Default::default()
        };

        let err = resolve_link(&api, &mut prompter, &mut session, &asset(AssetType::File))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Download(_)));
        assert_eq!(session.attempts, 0);
    }
}
