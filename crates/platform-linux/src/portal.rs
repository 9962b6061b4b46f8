//! XDG Desktop Portal display capture.
//!
//! # Flow
//!
//! 1. Connect to `org.freedesktop.portal.ScreenCast` via DBus
//! 2. Create a session
//! 3. Select sources (screen/window) with the requested cursor mode
//! 4. Start the stream → receive a PipeWire node ID
//!
//! The user-facing permission dialog is host-owned; a refusal or dismissal
//! surfaces here as `AcquisitionDenied`.

use ashpd::desktop::screencast::{CursorMode, Screencast, SourceType};
use ashpd::desktop::PersistMode;
use ashpd::WindowIdentifier;
use async_trait::async_trait;

use floatview_common::error::{FloatviewError, FloatviewResult};
use floatview_host_core::{CaptureRequest, DisplayCapture, MediaStream, SourceKind};

/// `DisplayCapture` backed by the XDG ScreenCast portal.
#[derive(Debug, Default)]
pub struct PortalDisplayCapture;

impl PortalDisplayCapture {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DisplayCapture for PortalDisplayCapture {
    async fn request_stream(&self, request: &CaptureRequest) -> FloatviewResult<MediaStream> {
        request_screencast(request).await
    }

    fn is_available(&self) -> bool {
        is_portal_available()
    }
}

/// Request a live capture stream through the XDG Desktop Portal.
async fn request_screencast(request: &CaptureRequest) -> FloatviewResult<MediaStream> {
    tracing::info!(
        source = ?request.source,
        embed_cursor = request.embed_cursor,
        "Requesting XDG ScreenCast session"
    );

    let proxy = Screencast::new()
        .await
        .map_err(|e| FloatviewError::unsupported(format!("ScreenCast portal unreachable: {e}")))?;

    let session = proxy
        .create_session()
        .await
        .map_err(|e| FloatviewError::unsupported(format!("Portal session creation failed: {e}")))?;

    proxy
        .select_sources(
            &session,
            cursor_mode_for(request.embed_cursor).into(),
            source_type_for(request.source).into(),
            false,
            None,
            PersistMode::DoNot,
        )
        .await
        .map_err(|e| acquisition_error("source selection failed", e))?;

    let response = proxy
        .start(&session, &WindowIdentifier::default())
        .await
        .map_err(|e| acquisition_error("portal start failed", e))?
        .response()
        .map_err(|e| acquisition_error("capture permission refused", e))?;

    let stream = response
        .streams()
        .first()
        .ok_or_else(|| FloatviewError::acquisition_denied("no capture source selected"))?;

    let size = stream
        .size()
        .map(|(width, height)| (width as u32, height as u32));
    tracing::info!(
        node_id = stream.pipe_wire_node_id(),
        ?size,
        "ScreenCast stream started"
    );

    Ok(MediaStream::new(
        stream.pipe_wire_node_id(),
        size,
        request.source,
    ))
}

fn cursor_mode_for(embed_cursor: bool) -> CursorMode {
    if embed_cursor {
        CursorMode::Embedded
    } else {
        CursorMode::Hidden
    }
}

fn source_type_for(kind: SourceKind) -> SourceType {
    match kind {
        SourceKind::Monitor => SourceType::Monitor,
        SourceKind::Window => SourceType::Window,
    }
}

fn acquisition_error(context: &str, err: ashpd::Error) -> FloatviewError {
    match err {
        ashpd::Error::Response(_) => {
            FloatviewError::acquisition_denied(format!("{context}: {err}"))
        }
        other => FloatviewError::unsupported(format!("{context}: {other}")),
    }
}

/// Check if the XDG ScreenCast portal is available.
pub fn is_portal_available() -> bool {
    // Check if org.freedesktop.portal.Desktop is available on DBus
    // For now, check if we're running under Wayland
    std::env::var("WAYLAND_DISPLAY").is_ok()
        || std::env::var("XDG_SESSION_TYPE")
            .map(|v| v == "wayland")
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_mode_follows_request() {
        assert!(matches!(cursor_mode_for(true), CursorMode::Embedded));
        assert!(matches!(cursor_mode_for(false), CursorMode::Hidden));
    }

    #[test]
    fn source_kinds_map_to_portal_types() {
        assert!(matches!(
            source_type_for(SourceKind::Monitor),
            SourceType::Monitor
        ));
        assert!(matches!(
            source_type_for(SourceKind::Window),
            SourceType::Window
        ));
    }

    #[test]
    fn refusal_maps_to_acquisition_denied() {
        let err = acquisition_error(
            "capture permission refused",
            ashpd::Error::Response(ashpd::desktop::ResponseError::Cancelled),
        );
        assert!(matches!(err, FloatviewError::AcquisitionDenied { .. }));
    }
}
