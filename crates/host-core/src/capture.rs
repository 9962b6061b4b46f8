//! Display-capture capability contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use floatview_common::config::CaptureDefaults;
use floatview_common::error::FloatviewResult;

/// What kind of display content to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Entire screen / monitor.
    #[default]
    Monitor,
    /// A specific window.
    Window,
}

impl SourceKind {
    /// Parse a config string, falling back to `Monitor` for unknown values.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "monitor" => Self::Monitor,
            "window" => Self::Window,
            other => {
                tracing::warn!(source = other, "Unknown capture source; using monitor");
                Self::Monitor
            }
        }
    }
}

/// Parameters for a display-capture request.
///
/// Video only: the captured stream carries no audio track.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Capture source kind.
    pub source: SourceKind,

    /// Whether the cursor is embedded in the captured stream.
    pub embed_cursor: bool,
}

impl CaptureRequest {
    /// Build a request from configured defaults.
    pub fn from_defaults(defaults: &CaptureDefaults) -> Self {
        Self {
            source: SourceKind::parse_lossy(&defaults.source),
            embed_cursor: defaults.embed_cursor,
        }
    }
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            source: SourceKind::Monitor,
            embed_cursor: true,
        }
    }
}

/// Handle to a live capture stream produced by the host environment.
///
/// The handle identifies the stream; its dimensions may be unknown until the
/// playback surface reports metadata ready.
#[derive(Debug, Clone)]
pub struct MediaStream {
    /// Host-assigned stream node ID (PipeWire node on Linux).
    pub node_id: u32,

    /// Dimensions advertised at acquisition time, if the host knows them.
    pub size: Option<(u32, u32)>,

    /// What the stream captures.
    pub source: SourceKind,

    /// Wall-clock time the stream was acquired (ISO 8601 string).
    pub acquired_wall: String,
}

impl MediaStream {
    /// Create a stream handle stamped with the current wall-clock time.
    pub fn new(node_id: u32, size: Option<(u32, u32)>, source: SourceKind) -> Self {
        Self {
            node_id,
            size,
            source,
            acquired_wall: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Host capability that produces live display-capture streams.
#[async_trait]
pub trait DisplayCapture: Send + Sync {
    /// Request a live capture stream from the host environment.
    ///
    /// Suspends until the host resolves or rejects the request; there is no
    /// way to cancel a pending request. Fails with `AcquisitionDenied` when
    /// permission is refused or no source is chosen.
    async fn request_stream(&self, request: &CaptureRequest) -> FloatviewResult<MediaStream>;

    /// Whether this capability is present on the current host at all.
    fn is_available(&self) -> bool {
        true
    }
}
