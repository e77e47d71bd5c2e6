/// Convenience result type used across stillmotion.
pub type StillmotionResult<T> = Result<T, StillmotionError>;

/// Error taxonomy for one export.
///
/// Every variant is terminal for the capture session that raised it; callers decide whether to
/// invoke the export again.
#[derive(thiserror::Error, Debug)]
pub enum StillmotionError {
    /// Invalid caller-provided request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source image could not be read, decoded, or did not load in time.
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// The raster drawing surface could not be acquired.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The host lacks the capture or encoding capability for the requested output.
    #[error("encoding unsupported: {0}")]
    EncodingUnsupported(String),

    /// The encoder faulted while a session was running.
    #[error("encoding runtime error: {0}")]
    EncodingRuntime(String),

    /// The caller aborted the export.
    #[error("export cancelled")]
    Cancelled,

    /// Another export is still running on the same exporter.
    #[error("session busy: an export is already in progress")]
    SessionBusy,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StillmotionError {
    /// Build a [`StillmotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StillmotionError::ImageLoad`] value.
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    /// Build a [`StillmotionError::SurfaceUnavailable`] value.
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build a [`StillmotionError::EncodingUnsupported`] value.
    pub fn encoding_unsupported(msg: impl Into<String>) -> Self {
        Self::EncodingUnsupported(msg.into())
    }

    /// Build a [`StillmotionError::EncodingRuntime`] value.
    pub fn encoding_runtime(msg: impl Into<String>) -> Self {
        Self::EncodingRuntime(msg.into())
    }

    /// Short, user-facing description of the general cause.
    ///
    /// Internal detail (paths, ffmpeg stderr) is deliberately left out.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "The export settings are invalid.",
            Self::ImageLoad(_) => "The image could not be loaded.",
            Self::SurfaceUnavailable(_) => "The drawing surface is not available.",
            Self::EncodingUnsupported(_) => "This output format is not supported here.",
            Self::EncodingRuntime(_) => "The encoder failed while generating the file.",
            Self::Cancelled => "The export was cancelled.",
            Self::SessionBusy => "Another export is still running.",
            Self::Other(_) => "There was an error generating your animated file.",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
