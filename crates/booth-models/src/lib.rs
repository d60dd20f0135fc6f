//! Shared data models for the FaceBooth compositing pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Facial landmark sets produced by an external detector
//! - Pixel-space bounding boxes and output viewports
//! - Zoom control ranges and resolved zoom state
//! - Linear tone transforms (color matrix + bias)
//! - Per-frame identity used to discard stale detection results

pub mod frame_id;
pub mod landmark;
pub mod rect;
pub mod tone;
pub mod zoom;

// Re-export common types
pub use frame_id::FrameId;
pub use landmark::{Landmark, LandmarkSet};
pub use rect::{BoundingBox, Viewport};
pub use tone::ToneTransform;
pub use zoom::{ZoomRange, ZoomRangeError, ZoomState};
