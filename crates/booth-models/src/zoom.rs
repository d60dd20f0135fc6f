//! Zoom control ranges and resolved zoom state.
//!
//! Cameras that expose hardware zoom report a positive control range and the
//! raw control value is already a magnification. Webcams without hardware
//! zoom get a software fallback: the UI slider spans a negative range and
//! the effective magnification is the reciprocal of the absolute raw value
//! (zoom-out only). The pipeline never sees that sign convention: a
//! `ZoomState` always carries a positive magnification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for an unusable zoom control range.
#[derive(Debug, Error, PartialEq)]
pub enum ZoomRangeError {
    #[error("zoom range min {min} must be less than max {max}")]
    EmptyRange { min: f64, max: f64 },
}

/// A caller-supplied zoom control range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZoomRange {
    /// Lowest raw control value
    pub min: f64,
    /// Highest raw control value
    pub max: f64,
    /// Slider step
    pub step: f64,
}

impl ZoomRange {
    /// Create a new range.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// The software fallback range used when hardware zoom is unavailable:
    /// raw values -4..-1, i.e. magnifications 0.25x..1x.
    pub fn software_default() -> Self {
        Self::new(-4.0, -1.0, 0.1)
    }

    /// Validate that the range is non-empty.
    pub fn validate(&self) -> Result<(), ZoomRangeError> {
        if self.min >= self.max {
            return Err(ZoomRangeError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Clamp a raw control value into the range.
    pub fn clamp(&self, raw: f64) -> f64 {
        raw.clamp(self.min, self.max)
    }
}

/// Resolved zoom parameters for one capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZoomState {
    /// Effective magnification, always positive. Values below 1 zoom out.
    pub factor: f64,
    /// Whether the capture device applied the zoom itself.
    pub hardware_supported: bool,
    /// Whether the frame should be mirrored about the vertical centerline.
    pub mirrored: bool,
}

impl ZoomState {
    /// Identity zoom: no magnification, no mirroring.
    pub fn identity() -> Self {
        Self {
            factor: 1.0,
            hardware_supported: true,
            mirrored: false,
        }
    }

    /// Builder-style mirror toggle.
    pub fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::identity()
    }
}
