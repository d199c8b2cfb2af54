//! Download progress sampling.
//!
//! The copy loop bumps a shared atomic counter as chunks are read; a sampler
//! task owned by the download reads it at a fixed cadence and forwards
//! snapshots to a [`ProgressSink`]. The sampler is stopped and joined before
//! the download returns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Cadence of progress events.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Snapshot of an in-flight download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadProgress {
    pub bytes_transferred: u64,
    /// Expected size; `None` when the server sent no length.
    pub total_bytes: Option<u64>,
    pub label: String,
}

/// Cumulative byte count shared between the copy loop and the sampler.
#[derive(Debug, Clone, Default)]
pub struct ProgressCounter(Arc<AtomicU64>);

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, bytes: u64) {
        self.0.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Receiver of progress snapshots.
pub trait ProgressSink: Send + 'static {
    /// Called once per sample interval while the download runs.
    fn update(&mut self, progress: &DownloadProgress);

    /// Called exactly once with the final count when sampling stops.
    fn finish(&mut self, progress: &DownloadProgress);
}

/// Sink that only logs, used when progress display is off.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn update(&mut self, progress: &DownloadProgress) {
        tracing::trace!(
            "{}: {} / {:?} bytes",
            progress.label,
            progress.bytes_transferred,
            progress.total_bytes
        );
    }

    fn finish(&mut self, progress: &DownloadProgress) {
        tracing::debug!(
            "{}: finished at {} bytes",
            progress.label,
            progress.bytes_transferred
        );
    }
}

/// Background task sampling a [`ProgressCounter`].
pub struct ProgressSampler {
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ProgressSampler {
    /// Start sampling `counter` every `interval`.
    pub fn spawn<S: ProgressSink>(
        counter: ProgressCounter,
        total_bytes: Option<u64>,
        label: String,
        mut sink: S,
        interval: Duration,
    ) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let snapshot = |counter: &ProgressCounter| DownloadProgress {
                bytes_transferred: counter.get(),
                total_bytes,
                label: label.clone(),
            };

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    // Fires on stop() and when the sampler is dropped
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => sink.update(&snapshot(&counter)),
                }
            }

            sink.finish(&snapshot(&counter));
        });

        Self {
            stop: Some(stop_tx),
            handle,
        }
    }

    /// Stop sampling and wait for the final event to be emitted.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }

        if let Err(e) = (&mut self.handle).await {
            tracing::warn!("Progress task failed: {}", e);
        }
    }
}
