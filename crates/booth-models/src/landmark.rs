//! Facial landmark sets produced by an external detector.
//!
//! Landmarks use the fixed MediaPipe FaceMesh numbering: the detector emits
//! an ordered sequence of normalized points and every consumer addresses
//! them by index. A frame with no face is represented as
//! `Option<LandmarkSet> = None`, which is distinct from an empty set.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rect::BoundingBox;

/// A normalized 2D point locating a facial feature.
///
/// Coordinates are fractions of the frame: `(0, 0)` is the top-left corner,
/// `(1, 1)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    /// Create a new landmark.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale to pixel space for the given frame dimensions.
    pub fn to_pixels(&self, width: u32, height: u32) -> (f64, f64) {
        (self.x * width as f64, self.y * height as f64)
    }
}

/// An ordered set of normalized landmarks for one detected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LandmarkSet {
    /// Landmark coordinates indexed by the detector's numbering scheme.
    pub points: Vec<Landmark>,
}

impl LandmarkSet {
    /// Create a landmark set from a vector of points.
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Create from `(x, y)` tuples.
    pub fn from_tuples(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::new(points.into_iter().map(|(x, y)| Landmark::new(x, y)).collect())
    }

    /// Number of landmarks in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Landmark at `index`, or `None` when the index is out of range.
    pub fn point(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    /// Bounding box of all landmarks in normalized space.
    pub fn bounds(&self) -> BoundingBox {
        if self.points.is_empty() {
            return BoundingBox::new(0.0, 0.0, 0.0, 0.0);
        }
        let min_x = self.points.iter().map(|p| p.x).fold(f64::MAX, f64::min);
        let max_x = self.points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let min_y = self.points.iter().map(|p| p.y).fold(f64::MAX, f64::min);
        let max_y = self.points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        BoundingBox::from_corners(min_x, min_y, max_x, max_y)
    }

    /// Parse a landmark set from detector JSON (an array of `{x, y}` objects).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let points: Vec<Landmark> = serde_json::from_str(json)?;
        Ok(Self::new(points))
    }

    /// Serialize the points back to detector JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.points)
    }
}
