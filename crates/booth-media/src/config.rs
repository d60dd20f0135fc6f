//! Configuration for the capture pipeline.

use booth_models::ZoomRange;
use serde::{Deserialize, Serialize};

use crate::error::CaptureResult;

/// Configuration for the capture pipeline.
///
/// One instance covers every call site; sites differ only in which optional
/// stages (masking, toning) their requests enable, not in pipeline wiring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Feather radius for the face mask edge, in pixels (default: 40).
    /// Zero disables feathering.
    #[serde(default = "default_feather_radius")]
    pub feather_radius: u32,

    /// Zoom control range handed to `resolve_zoom` (default: the software
    /// fallback range, raw -4..-1).
    #[serde(default = "default_zoom_range")]
    pub zoom_range: ZoomRange,
}

fn default_feather_radius() -> u32 {
    40
}

fn default_zoom_range() -> ZoomRange {
    ZoomRange::software_default()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            feather_radius: default_feather_radius(),
            zoom_range: default_zoom_range(),
        }
    }
}

impl CaptureConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> CaptureResult<()> {
        self.zoom_range.validate()?;
        Ok(())
    }
}
