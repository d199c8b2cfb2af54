//! Streaming an asset to disk.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{header, Client};
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::course::Asset;
use crate::download::progress::{LogSink, ProgressCounter, ProgressSampler, SAMPLE_INTERVAL};
use crate::error::{Error, Result};
use crate::fs::partial_path;
use crate::output::BarSink;

/// Writes a resolved asset URL to a local file.
#[async_trait]
pub trait AssetDownloader: Send + Sync {
    /// Stream `url` into `destination`, returning the number of bytes written.
    async fn download(&self, url: &str, asset: &Asset, destination: &Path) -> Result<u64>;
}

/// Downloader fetching asset URLs over HTTP.
pub struct HttpDownloader {
    client: Client,
    show_progress: bool,
    keep_partial_files: bool,
    probe_timeout: Duration,
    sample_interval: Duration,
}

impl HttpDownloader {
    pub fn new(client: Client, probe_timeout: Duration) -> Self {
        Self {
            client,
            show_progress: true,
            keep_partial_files: false,
            probe_timeout,
            sample_interval: SAMPLE_INTERVAL,
        }
    }

    /// Draw progress bars while downloading.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Leave partially written files on disk after a failure.
    pub fn keep_partial_files(mut self, keep: bool) -> Self {
        self.keep_partial_files = keep;
        self
    }

    /// Ask the server for the content length without fetching the body.
    async fn probe_length(&self, url: &str) -> Result<Option<u64>> {
        let response = self
            .client
            .head(url)
            .timeout(self.probe_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("HEAD {} returned {}", url, response.status());
            return Ok(None);
        }

        Ok(content_length(response.headers()))
    }

    /// Fetch `url` and stream it into an already created file.
    async fn fetch_into(&self, url: &str, asset: &Asset, file: &mut File) -> Result<u64> {
        let probed = self.probe_length(url).await?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "HTTP {} for {}, try to download from link {}",
                response.status(),
                asset.title,
                url
            )));
        }

        let total = probed.or_else(|| content_length(response.headers()));
        tracing::debug!("Downloading {} ({:?} bytes)", asset.title, total);

        let counter = ProgressCounter::new();
        let sampler = if self.show_progress {
            ProgressSampler::spawn(
                counter.clone(),
                total,
                asset.title.clone(),
                BarSink::new(total, &asset.title),
                self.sample_interval,
            )
        } else {
            ProgressSampler::spawn(
                counter.clone(),
                total,
                asset.title.clone(),
                LogSink,
                self.sample_interval,
            )
        };

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| Error::Stream(e.to_string())));
        let copied = copy_stream(stream, file, &counter).await;

        sampler.stop().await;
        copied
    }
}

#[async_trait]
impl AssetDownloader for HttpDownloader {
    async fn download(&self, url: &str, asset: &Asset, destination: &Path) -> Result<u64> {
        // Only complete downloads ever appear under the final name
        let partial = partial_path(destination);
        let mut file = File::create(&partial)
            .await
            .map_err(|source| Error::FileCreate {
                path: partial.clone(),
                source,
            })?;

        let result = self.fetch_into(url, asset, &mut file).await;
        drop(file);

        match result {
            Ok(bytes) => {
                tokio::fs::rename(&partial, destination)
                    .await
                    .map_err(|source| Error::FileCreate {
                        path: destination.to_path_buf(),
                        source,
                    })?;
                Ok(bytes)
            }
            Err(e) => {
                if !self.keep_partial_files {
                    if let Err(remove) = tokio::fs::remove_file(&partial).await {
                        tracing::warn!(
                            "Failed to remove partial file {}: {}",
                            partial.display(),
                            remove
                        );
                    }
                }
                Err(e)
            }
        }
    }
}

/// Parse the `Content-Length` header.
fn content_length(headers: &header::HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Copy a chunk stream into `writer`, counting bytes as they are read.
///
/// The body is never buffered beyond one chunk.
pub async fn copy_stream<S, B, W>(stream: S, writer: &mut W, counter: &ProgressCounter) -> Result<u64>
where
    S: Stream<Item = Result<B>>,
    B: AsRef<[u8]>,
    W: AsyncWrite + Unpin + ?Sized,
{
    let stream = stream.inspect(|chunk| {
        if let Ok(chunk) = chunk {
            counter.add(chunk.as_ref().len() as u64);
        }
    });
    futures::pin_mut!(stream);

    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(chunk.as_ref()).await?;
        written += chunk.as_ref().len() as u64;
    }

    writer.flush().await?;
    Ok(written)
}
