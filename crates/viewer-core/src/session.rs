//! Capture session control and floating-viewer toggling.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use floatview_common::error::{FloatviewError, FloatviewResult};
use floatview_host_core::{CaptureRequest, DisplayCapture, PlaybackSurface, TriggerControl};

/// Lifecycle phase of the capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No stream acquired (initial state, or acquisition failed).
    Unacquired,
    /// Acquisition request in flight.
    Acquiring,
    /// Stream bound to the playback surface and playing.
    Bound,
}

/// Host capabilities the controller drives.
///
/// Construction validates that every capability is present and fails fast
/// with `MissingDependency` otherwise, so a half-wired controller can never
/// exist.
pub struct HostBindings {
    pub(crate) capture: Arc<dyn DisplayCapture>,
    pub(crate) surface: Arc<dyn PlaybackSurface>,
    pub(crate) trigger: Arc<dyn TriggerControl>,
}

impl std::fmt::Debug for HostBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBindings").finish_non_exhaustive()
    }
}

impl HostBindings {
    pub fn new(
        capture: Option<Arc<dyn DisplayCapture>>,
        surface: Option<Arc<dyn PlaybackSurface>>,
        trigger: Option<Arc<dyn TriggerControl>>,
    ) -> FloatviewResult<Self> {
        Ok(Self {
            capture: capture
                .ok_or_else(|| FloatviewError::missing_dependency("display capture"))?,
            surface: surface
                .ok_or_else(|| FloatviewError::missing_dependency("playback surface"))?,
            trigger: trigger
                .ok_or_else(|| FloatviewError::missing_dependency("trigger control"))?,
        })
    }
}

/// The capture session controller.
///
/// Owns references to the playback surface and trigger control, acquires a
/// display stream at most once, and mediates floating-viewer toggling. All
/// capture/viewer errors are absorbed here: they are logged and the session
/// stays usable, so the user can re-trigger the floating viewer after any
/// failure.
pub struct CaptureController {
    capture: Arc<dyn DisplayCapture>,
    surface: Arc<dyn PlaybackSurface>,
    trigger: Arc<dyn TriggerControl>,
    request: CaptureRequest,
    phase: SessionPhase,
    acquisition_attempted: bool,
}

impl CaptureController {
    /// Create a controller with the given host bindings and capture request.
    pub fn new(bindings: HostBindings, request: CaptureRequest) -> Self {
        bindings.trigger.set_enabled(true);
        Self {
            capture: bindings.capture,
            surface: bindings.surface,
            trigger: bindings.trigger,
            request,
            phase: SessionPhase::Unacquired,
            acquisition_attempted: false,
        }
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Acquire a display stream and bind it to the playback surface.
    ///
    /// Best-effort and one-shot: a failure is logged, the session returns to
    /// `Unacquired`, and no retry is attempted. Calls after the first are
    /// no-ops. The surface's active source is mutated exactly once, on
    /// success only.
    pub async fn acquire_and_bind(&mut self) -> SessionPhase {
        if self.acquisition_attempted {
            tracing::warn!("Acquisition already attempted; ignoring");
            return self.phase;
        }
        self.acquisition_attempted = true;
        self.phase = SessionPhase::Acquiring;

        let outcome = Self::acquire_once(
            self.capture.clone(),
            self.surface.clone(),
            self.request.clone(),
        )
        .await;
        self.phase = Self::settle_acquisition(outcome);
        self.phase
    }

    /// Toggle the playback surface into floating-viewer mode.
    ///
    /// State machine: Idle (trigger enabled) → Requesting (trigger disabled)
    /// → back to Idle once the request settles. The trigger is re-enabled
    /// exactly once per activation, on success and failure alike. The
    /// controller tracks no "currently floating" state; exiting floating
    /// mode is host-driven.
    pub async fn toggle_floating_viewer(&mut self) {
        if !self.trigger.is_enabled() {
            // A request is already in flight; the host should not have
            // delivered this activation at all.
            tracing::debug!("Activation while trigger disabled; ignoring");
            return;
        }
        self.trigger.set_enabled(false);
        match self.request_floating_viewer().await {
            Ok(()) => tracing::info!("Entered floating viewer"),
            Err(e) if e.is_attempt_local() => {
                tracing::warn!(error = %e, "Floating viewer request failed")
            }
            Err(e) => tracing::error!(error = %e, "Floating viewer request failed"),
        }
        self.trigger.set_enabled(true);
    }

    /// Run the controller: start acquisition, then service trigger
    /// activations until every sender is dropped or closed.
    ///
    /// Acquisition runs on its own task, so a pending floating-viewer
    /// request never delays it and a pending acquisition never delays the
    /// trigger. If the loop ends while acquisition is still in flight, the
    /// eventual outcome is discarded as a no-op. Returns the final phase.
    pub async fn run(mut self, mut activations: mpsc::Receiver<()>) -> SessionPhase {
        let (done_tx, mut done_rx) = oneshot::channel();
        if self.acquisition_attempted {
            tracing::warn!("Acquisition already attempted; run loop only services the trigger");
            drop(done_tx);
        } else {
            self.acquisition_attempted = true;
            self.phase = SessionPhase::Acquiring;
            let capture = self.capture.clone();
            let surface = self.surface.clone();
            let request = self.request.clone();
            tokio::spawn(async move {
                let outcome = Self::acquire_once(capture, surface, request).await;
                // The run loop may already be gone; dropping the outcome is
                // the required no-op in that case.
                let _ = done_tx.send(outcome);
            });
        }

        let mut acquisition_settled = false;
        loop {
            tokio::select! {
                outcome = &mut done_rx, if !acquisition_settled => {
                    acquisition_settled = true;
                    match outcome {
                        Ok(result) => self.phase = Self::settle_acquisition(result),
                        Err(_) => tracing::debug!("Acquisition outcome channel closed"),
                    }
                }
                activation = activations.recv() => match activation {
                    Some(()) => self.toggle_floating_viewer().await,
                    None => break,
                },
            }
        }

        tracing::debug!(phase = ?self.phase, "Controller run loop ended");
        self.phase
    }

    async fn request_floating_viewer(&self) -> FloatviewResult<()> {
        if !self.surface.has_stream() {
            return Err(FloatviewError::floating_viewer(
                "no stream bound to the playback surface",
            ));
        }
        self.surface.enter_floating_viewer().await
    }

    async fn acquire_once(
        capture: Arc<dyn DisplayCapture>,
        surface: Arc<dyn PlaybackSurface>,
        request: CaptureRequest,
    ) -> FloatviewResult<()> {
        let stream = capture.request_stream(&request).await?;
        tracing::info!(
            node_id = stream.node_id,
            source = ?stream.source,
            "Capture stream acquired"
        );
        surface.bind_stream(stream).await?;

        // Playback cannot start reliably before the surface knows the
        // stream's dimensions and timing.
        let info = surface.metadata_ready().await?;
        tracing::debug!(width = info.width, height = info.height, "Stream metadata ready");
        surface.play().await?;
        Ok(())
    }

    fn settle_acquisition(outcome: FloatviewResult<()>) -> SessionPhase {
        match outcome {
            Ok(()) => {
                tracing::info!("Capture session bound and playing");
                SessionPhase::Bound
            }
            Err(e) if e.is_attempt_local() => {
                tracing::warn!(error = %e, "Capture acquisition failed");
                SessionPhase::Unacquired
            }
            Err(e) => {
                tracing::error!(error = %e, "Capture acquisition failed");
                SessionPhase::Unacquired
            }
        }
    }
}
