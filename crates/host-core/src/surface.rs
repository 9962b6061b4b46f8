//! Playback-surface capability contract and the metadata-ready latch.

use async_trait::async_trait;
use tokio::sync::watch;

use floatview_common::error::{FloatviewError, FloatviewResult};

use crate::capture::MediaStream;

/// Stream metadata reported by the surface once dimensions and timing are
/// known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
}

/// Host sink that renders a bound live stream.
///
/// A surface owns at most one active stream; binding a new stream replaces
/// the old one.
#[async_trait]
pub trait PlaybackSurface: Send + Sync {
    /// Attach a stream as the surface's active source.
    async fn bind_stream(&self, stream: MediaStream) -> FloatviewResult<()>;

    /// Wait until the surface knows the bound stream's metadata.
    ///
    /// One-shot per bind: resolves immediately if metadata is already known.
    /// Fails with `PlaybackBindingFailed` if the surface goes away first.
    async fn metadata_ready(&self) -> FloatviewResult<StreamInfo>;

    /// Begin playback.
    ///
    /// Repeated calls after a successful start must be benign no-ops; the
    /// host may report metadata more than once. Fails with
    /// `PlaybackBindingFailed` when autoplay/codec constraints are unmet.
    async fn play(&self) -> FloatviewResult<()>;

    /// Ask the host to move the surface into floating (always-on-top) mode.
    ///
    /// Fails with `FloatingViewerRejected` if no content is bound or the
    /// mode is unsupported. Exiting floating mode is host-driven and not
    /// part of this contract.
    async fn enter_floating_viewer(&self) -> FloatviewResult<()>;

    /// Whether a stream is currently bound.
    fn has_stream(&self) -> bool;
}

/// One-shot metadata latch for [`PlaybackSurface`] implementations.
///
/// The first `signal` latches the value; later signals are ignored. `wait`
/// resolves once the latch holds a value, immediately if it already does, so
/// a signal fired before the waiter registers is never lost.
#[derive(Debug)]
pub struct MetadataGate {
    tx: watch::Sender<Option<StreamInfo>>,
    rx: watch::Receiver<Option<StreamInfo>>,
}

impl MetadataGate {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(None);
        Self { tx, rx }
    }

    /// Record stream metadata. Returns `false` if the latch already fired.
    pub fn signal(&self, info: StreamInfo) -> bool {
        self.tx.send_if_modified(|slot| {
            if slot.is_none() {
                *slot = Some(info);
                true
            } else {
                tracing::debug!("Metadata signaled again; keeping first value");
                false
            }
        })
    }

    /// Wait for the latch to fire.
    pub async fn wait(&self) -> FloatviewResult<StreamInfo> {
        let mut rx = self.rx.clone();
        let slot = rx.wait_for(|slot| slot.is_some()).await.map_err(|_| {
            FloatviewError::playback_binding("surface dropped before metadata was ready")
        })?;
        (*slot).ok_or_else(|| FloatviewError::playback_binding("metadata latch empty"))
    }
}

impl Default for MetadataGate {
    fn default() -> Self {
        Self::new()
    }
}
