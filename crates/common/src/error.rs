//! Error types shared across Floatview crates.

/// Top-level error type for Floatview operations.
///
/// The three capture/viewer variants (`AcquisitionDenied`,
/// `PlaybackBindingFailed`, `FloatingViewerRejected`) are non-fatal and local
/// to a single attempt: callers log them and restore the trigger to an
/// interactable state rather than propagating them upward.
#[derive(Debug, thiserror::Error)]
pub enum FloatviewError {
    /// Capture permission refused, request cancelled, or no source chosen.
    #[error("Capture acquisition denied: {message}")]
    AcquisitionDenied { message: String },

    /// The stream could not be bound and played on the playback surface.
    #[error("Playback binding failed: {message}")]
    PlaybackBindingFailed { message: String },

    /// The surface refused to enter floating-viewer mode.
    #[error("Floating viewer rejected: {message}")]
    FloatingViewerRejected { message: String },

    /// A required host capability was not provided at construction time.
    #[error("Missing host dependency: {name}")]
    MissingDependency { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FloatviewError.
pub type FloatviewResult<T> = Result<T, FloatviewError>;

impl FloatviewError {
    pub fn acquisition_denied(msg: impl Into<String>) -> Self {
        Self::AcquisitionDenied {
            message: msg.into(),
        }
    }

    pub fn playback_binding(msg: impl Into<String>) -> Self {
        Self::PlaybackBindingFailed {
            message: msg.into(),
        }
    }

    pub fn floating_viewer(msg: impl Into<String>) -> Self {
        Self::FloatingViewerRejected {
            message: msg.into(),
        }
    }

    pub fn missing_dependency(name: impl Into<String>) -> Self {
        Self::MissingDependency { name: name.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether this error aborts only the attempt that produced it, never
    /// the session.
    pub fn is_attempt_local(&self) -> bool {
        matches!(
            self,
            Self::AcquisitionDenied { .. }
                | Self::PlaybackBindingFailed { .. }
                | Self::FloatingViewerRejected { .. }
        )
    }
}
