//! Error types for capture and compositing operations.

use booth_models::ZoomRangeError;
use thiserror::Error;

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Errors that can occur while compositing a capture.
///
/// Every error is scoped to a single capture request; the caller decides
/// whether to resubmit on the next frame. "No face detected" is not an
/// error; it is `Ok(None)` at the detector boundary.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("landmark index {index} out of range for set of {len} points")]
    MissingLandmarks { index: usize, len: usize },

    #[error("zoom range min {min} must be less than max {max}")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("frame has degenerate dimensions {width}x{height}")]
    DegenerateFrame { width: u32, height: u32 },

    #[error("overlay bitmap is empty")]
    EmptyOverlay,

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("landmark detection failed: {0}")]
    DetectionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CaptureError {
    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<ZoomRangeError> for CaptureError {
    fn from(err: ZoomRangeError) -> Self {
        match err {
            ZoomRangeError::EmptyRange { min, max } => Self::InvalidZoomRange { min, max },
        }
    }
}
