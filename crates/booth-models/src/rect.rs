//! Pixel-space rectangles and output viewports.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner
    pub x: f64,
    /// Y coordinate of the top-left corner
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from min/max corners. Swapped corners are normalized so the
    /// resulting width and height are never negative.
    pub fn from_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let (min_x, max_x) = if min_x <= max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let (min_y, max_y) = if min_y <= max_y {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Clamp the box to `[0, width] x [0, height]`.
    pub fn clamped(&self, width: f64, height: f64) -> Self {
        let min_x = self.x.clamp(0.0, width);
        let min_y = self.y.clamp(0.0, height);
        let max_x = (self.x + self.width).clamp(0.0, width);
        let max_y = (self.y + self.height).clamp(0.0, height);
        Self::from_corners(min_x, min_y, max_x, max_y)
    }

    /// Center point of the box.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area in square pixels.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the box encloses no pixels.
    pub fn is_degenerate(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

/// Target output size for a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Viewport {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height ratio.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
