//! Geometry engine: cover fitting, zoom resolution and contour math.
//!
//! Everything in this module is pure math over dimensions and normalized
//! landmark coordinates; no pixel data is touched. The compositor consumes
//! the rectangles produced here.

use booth_models::{BoundingBox, LandmarkSet, ZoomRange, ZoomState};

use crate::error::{CaptureError, CaptureResult};

/// Landmark indices tracing the face outline: jawline plus forehead arc,
/// in the MediaPipe FaceMesh numbering. The order is the natural winding of
/// the contour and must not be re-sorted.
pub const FACE_OVAL_INDICES: [usize; 36] = [
    10, 338, 297, 332, 284, 251, 389, 356, 454, 323, 361, 288, 397, 365, 379, 378, 400, 377, 152,
    148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54, 103, 67, 109,
];

/// Placement rectangle for drawing a source into a target, in target
/// coordinates. May extend beyond the target bounds (cover overflow).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawRect {
    /// Center point of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Compute the object-cover placement of a source inside a target.
///
/// The source is scaled, aspect preserved, to the smallest rectangle that
/// fully covers the target; overflow is centered. The wider input (relative
/// to the target) overflows horizontally, the taller one vertically.
pub fn fit_cover(
    source_w: u32,
    source_h: u32,
    target_w: u32,
    target_h: u32,
) -> CaptureResult<DrawRect> {
    if source_w == 0 || source_h == 0 {
        return Err(CaptureError::DegenerateFrame {
            width: source_w,
            height: source_h,
        });
    }
    if target_w == 0 || target_h == 0 {
        return Err(CaptureError::DegenerateFrame {
            width: target_w,
            height: target_h,
        });
    }

    let source_ratio = source_w as f64 / source_h as f64;
    let target_ratio = target_w as f64 / target_h as f64;

    let (width, height, x, y) = if source_ratio > target_ratio {
        // Source is wider: match height, overflow width symmetrically.
        let height = target_h as f64;
        let width = height * source_ratio;
        (width, height, (target_w as f64 - width) / 2.0, 0.0)
    } else {
        // Source is taller (or equal): match width, overflow height.
        let width = target_w as f64;
        let height = width / source_ratio;
        (width, height, 0.0, (target_h as f64 - height) / 2.0)
    };

    Ok(DrawRect {
        x,
        y,
        width,
        height,
    })
}

/// Scale a draw rect by `factor` about its own center, keeping the zoomed
/// rectangle centered where the original was.
pub fn apply_zoom(rect: DrawRect, factor: f64) -> DrawRect {
    let width = rect.width * factor;
    let height = rect.height * factor;
    DrawRect {
        x: rect.x - (width - rect.width) / 2.0,
        y: rect.y - (height - rect.height) / 2.0,
        width,
        height,
    }
}

/// Resolve a raw zoom control value into a positive magnification.
///
/// With hardware zoom the raw value already is the magnification. Without
/// it, the control surface spans a negative range and the effective
/// magnification is the reciprocal of the absolute raw value, which keeps
/// software zoom strictly a zoom-out. The raw value is clamped into the
/// supplied range first.
pub fn resolve_zoom(
    raw: f64,
    range: &ZoomRange,
    hardware_supported: bool,
    mirrored: bool,
) -> CaptureResult<ZoomState> {
    range.validate()?;
    let raw = range.clamp(raw);

    let factor = if hardware_supported {
        raw
    } else {
        (1.0 / raw).abs()
    };
    if !factor.is_finite() || factor <= 0.0 {
        return Err(CaptureError::internal(format!(
            "zoom control value {raw} resolves to unusable magnification {factor}"
        )));
    }

    Ok(ZoomState {
        factor,
        hardware_supported,
        mirrored,
    })
}

/// Map a positive magnification back to the software control convention
/// (negative raw values). Inverse of `resolve_zoom` in software mode; this
/// is the only place the sign mapping exists.
pub fn software_control_value(magnification: f64) -> f64 {
    -(1.0 / magnification)
}

/// Scale the landmarks at `indices` into pixel space, tracing the contour
/// polygon. Fails when any index is out of range of the set.
pub fn contour_polygon(
    landmarks: &LandmarkSet,
    indices: &[usize],
    width: u32,
    height: u32,
) -> CaptureResult<Vec<(f64, f64)>> {
    indices
        .iter()
        .map(|&index| {
            landmarks
                .point(index)
                .map(|p| p.to_pixels(width, height))
                .ok_or(CaptureError::MissingLandmarks {
                    index,
                    len: landmarks.len(),
                })
        })
        .collect()
}

/// Axis-aligned bounds of a polygon, clamped to `[0, width] x [0, height]`.
/// Degenerates to a zero-area box when all vertices coincide.
pub fn bounding_box(polygon: &[(f64, f64)], width: u32, height: u32) -> BoundingBox {
    if polygon.is_empty() {
        return BoundingBox::new(0.0, 0.0, 0.0, 0.0);
    }
    let min_x = polygon.iter().map(|p| p.0).fold(f64::MAX, f64::min);
    let max_x = polygon.iter().map(|p| p.0).fold(f64::MIN, f64::max);
    let min_y = polygon.iter().map(|p| p.1).fold(f64::MAX, f64::min);
    let max_y = polygon.iter().map(|p| p.1).fold(f64::MIN, f64::max);
    BoundingBox::from_corners(min_x, min_y, max_x, max_y).clamped(width as f64, height as f64)
}
