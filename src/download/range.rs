//! Range driver: downloads the selected lectures one after another.

use std::fmt;

use crate::api::CourseApi;
use crate::course::{Asset, AssetMap};
use crate::download::file::AssetDownloader;
use crate::download::resolver::resolve_link;
use crate::download::session::Session;
use crate::error::Result;
use crate::fs::asset_path;
use crate::output::{print_info, print_warning};
use crate::prompt::{ask_range, ask_resolution, Prompter};

/// Phases of a range download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    AwaitingRange,
    AwaitingResolution,
    Iterating,
    Done,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverState::AwaitingRange => write!(f, "awaiting range"),
            DriverState::AwaitingResolution => write!(f, "awaiting resolution"),
            DriverState::Iterating => write!(f, "iterating"),
            DriverState::Done => write!(f, "done"),
        }
    }
}

/// Download every populated slot of `assets` within the session's range.
///
/// Missing range or resolution values are asked from the prompter first.
/// Downloads run strictly in index order. Per-asset failures are counted and
/// skipped; errors for which [`Error::aborts_run`] holds end the run.
///
/// [`Error::aborts_run`]: crate::error::Error::aborts_run
pub async fn download_range<A, D, P>(
    api: &A,
    downloader: &D,
    prompter: &mut P,
    session: &mut Session,
    assets: &AssetMap,
) -> Result<()>
where
    A: CourseApi + ?Sized,
    D: AssetDownloader + ?Sized,
    P: Prompter + ?Sized,
{
    let mut state = DriverState::AwaitingRange;

    loop {
        tracing::debug!("Range driver: {}", state);

        state = match state {
            DriverState::AwaitingRange => {
                if session.range.is_none() {
                    session.range = Some(ask_range(prompter)?);
                }
                DriverState::AwaitingResolution
            }
            DriverState::AwaitingResolution => {
                if session.resolution.is_none() {
                    session.resolution = Some(ask_resolution(prompter)?);
                }
                DriverState::Iterating
            }
            DriverState::Iterating => {
                let Some(range) = session.range else {
                    return Ok(());
                };

                tracing::info!("Downloading lectures {} to {}", range.start, range.end);
                for (_, asset) in assets.range(range.start..=range.end) {
                    download_one(api, downloader, prompter, session, asset).await?;
                }
                DriverState::Done
            }
            DriverState::Done => return Ok(()),
        };
    }
}

/// Resolve and download a single asset, recording the outcome on the session.
async fn download_one<A, D, P>(
    api: &A,
    downloader: &D,
    prompter: &mut P,
    session: &mut Session,
    asset: &Asset,
) -> Result<()>
where
    A: CourseApi + ?Sized,
    D: AssetDownloader + ?Sized,
    P: Prompter + ?Sized,
{
    if asset.id == 0 || session.is_asset_seen(asset.id) {
        return Ok(());
    }
    session.mark_asset_seen(asset.id);

    let destination = asset_path(&session.download_dir, asset)?;
    if destination.exists() && !session.overwrite_existing {
        tracing::debug!("Skipping existing file: {}", destination.display());
        print_info(&format!("Already downloaded: {}", destination.display()));
        session.record_skip();
        return Ok(());
    }

    let outcome = match resolve_link(api, prompter, session, asset).await {
        Ok(url) => downloader.download(&url, asset, &destination).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(bytes) => {
            session.record_download(bytes);
            Ok(())
        }
        Err(e) if e.aborts_run() => Err(e),
        Err(e) => {
            tracing::warn!("Failed to download asset {}: {}", asset.id, e);
            print_warning(&format!("Skipping {}: {}", asset.title, e));
            session.record_failure();
            Ok(())
        }
    }
}
