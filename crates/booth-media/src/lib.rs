#![deny(unreachable_patterns)]
//! Landmark-guided mask, crop and composite pipeline for FaceBooth.
//!
//! This crate provides:
//! - Pure geometry: object-cover fitting, zoom resolution, contour math
//! - Face mask rasterization with optional edge feathering
//! - Pixel compositing with mirror compensation and overlay branding
//! - Linear tone transforms (color matrix + bias)
//! - A per-request capture orchestrator and an async detector boundary
//!   that discards stale results by frame identity

pub mod compositor;
pub mod config;
pub mod detector;
pub mod error;
pub mod export;
pub mod frame;
pub mod geometry;
pub mod mask;
pub mod orchestrator;
pub mod overlay;
pub mod tone;

pub use compositor::{composite_live_capture, composite_masked, draw_frame, draw_overlay};
pub use config::CaptureConfig;
pub use detector::{DetectionSession, LandmarkDetector, PendingLandmarks};
pub use error::{CaptureError, CaptureResult};
pub use export::{encode_png, photo_filename};
pub use frame::{Frame, PixelBuffer, BYTES_PER_PIXEL};
pub use geometry::{
    apply_zoom, bounding_box, contour_polygon, fit_cover, resolve_zoom, software_control_value,
    DrawRect, FACE_OVAL_INDICES,
};
pub use mask::{build_mask, MaskBuffer};
pub use orchestrator::{
    compose, compose_with_detection, resolve_request_zoom, CaptureStage, CompositeOutput,
    CompositeRequest,
};
pub use overlay::{OverlayAsset, OverlayConfig, DEFAULT_OVERLAY_PATH};
pub use tone::apply_tone;
