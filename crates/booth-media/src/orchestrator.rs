//! Capture orchestrator: sequences fitting, masking, toning and overlay
//! drawing for one capture request.
//!
//! Each request runs to completion (or failure) on its own; there is no
//! shared mutable state between requests and no internal retry. A failed
//! capture is surfaced to the caller, who decides whether to resubmit on
//! the next frame.

use std::fmt;
use std::sync::Arc;

use booth_models::{FrameId, LandmarkSet, ToneTransform, Viewport, ZoomState};
use metrics::counter;
use tracing::{debug, info, warn};

use crate::compositor::{composite_masked, draw_frame, draw_overlay};
use crate::config::CaptureConfig;
use crate::detector::DetectionSession;
use crate::error::{CaptureError, CaptureResult};
use crate::frame::{Frame, PixelBuffer};
use crate::geometry::{
    apply_zoom, bounding_box, contour_polygon, fit_cover, resolve_zoom, FACE_OVAL_INDICES,
};
use crate::mask::build_mask;
use crate::overlay::OverlayAsset;
use crate::tone::apply_tone;

/// Stages of one capture request.
///
/// `Fitting` always runs; `Masking` only when a face was detected; `Toning`
/// only when a tone transform was requested; `Overlaying` always runs last.
/// The terminal states are `Done` or a failure carrying a `CaptureError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStage {
    Idle,
    Fitting,
    Masking,
    Toning,
    Overlaying,
    Done,
}

impl fmt::Display for CaptureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureStage::Idle => "idle",
            CaptureStage::Fitting => "fitting",
            CaptureStage::Masking => "masking",
            CaptureStage::Toning => "toning",
            CaptureStage::Overlaying => "overlaying",
            CaptureStage::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// One capture request. The frame is borrowed read-only; the output buffer
/// is freshly owned by the result.
#[derive(Debug)]
pub struct CompositeRequest<'a> {
    pub frame: &'a Frame,
    /// Landmarks for this frame, or `None` when no face was detected.
    pub landmarks: Option<&'a LandmarkSet>,
    /// Resolved zoom/mirror state; `None` means identity and unmirrored.
    pub zoom: Option<ZoomState>,
    /// Optional recolor, applied before the overlay draw.
    pub tone: Option<&'a ToneTransform>,
    pub overlay: &'a OverlayAsset,
    pub viewport: Viewport,
}

/// A finished composite. Ownership of the buffer transfers to the caller.
#[derive(Debug)]
pub struct CompositeOutput {
    pub buffer: PixelBuffer,
    /// Identity of the source frame.
    pub frame_id: FrameId,
    /// Whether the face-mask path produced this output (the buffer then has
    /// the crop box's dimensions rather than the viewport's).
    pub masked: bool,
}

/// Resolve a raw zoom control value against the configured range.
///
/// Thin wrapper over the geometry engine that supplies the configured
/// control range, for callers holding raw slider values.
pub fn resolve_request_zoom(
    raw: f64,
    hardware_supported: bool,
    mirrored: bool,
    config: &CaptureConfig,
) -> CaptureResult<ZoomState> {
    resolve_zoom(raw, &config.zoom_range, hardware_supported, mirrored)
}

/// Run one capture request through the pipeline.
pub fn compose(
    request: &CompositeRequest<'_>,
    config: &CaptureConfig,
) -> CaptureResult<CompositeOutput> {
    let mut stage = CaptureStage::Idle;
    match compose_inner(request, config, &mut stage) {
        Ok(output) => {
            counter!("booth_captures_total").increment(1);
            info!(
                frame = %output.frame_id,
                masked = output.masked,
                width = output.buffer.width(),
                height = output.buffer.height(),
                "Capture composed"
            );
            Ok(output)
        }
        Err(err) => {
            counter!("booth_capture_failures_total").increment(1);
            warn!(frame = %request.frame.id(), stage = %stage, error = %err, "Capture failed");
            Err(err)
        }
    }
}

fn compose_inner(
    request: &CompositeRequest<'_>,
    config: &CaptureConfig,
    stage: &mut CaptureStage,
) -> CaptureResult<CompositeOutput> {
    config.validate()?;
    let frame = request.frame;

    *stage = CaptureStage::Fitting;
    if request.viewport.is_empty() {
        return Err(CaptureError::DegenerateFrame {
            width: request.viewport.width,
            height: request.viewport.height,
        });
    }
    let fit = fit_cover(
        frame.native_width(),
        frame.native_height(),
        request.viewport.width,
        request.viewport.height,
    )?;
    let zoom = request.zoom.unwrap_or_default();
    let rect = apply_zoom(fit, zoom.factor);
    debug!(
        frame = %frame.id(),
        zoom = zoom.factor,
        mirrored = zoom.mirrored,
        "Fitted frame to viewport"
    );

    let (mut buffer, masked) = match request.landmarks {
        Some(landmarks) => {
            *stage = CaptureStage::Masking;
            let polygon =
                contour_polygon(landmarks, &FACE_OVAL_INDICES, frame.width(), frame.height())?;
            let bounds = bounding_box(&polygon, frame.width(), frame.height());
            let mask = build_mask(
                &polygon,
                frame.width(),
                frame.height(),
                config.feather_radius,
            );
            let buffer = composite_masked(frame, &mask, &bounds)?;
            debug!(
                frame = %frame.id(),
                crop_width = buffer.width(),
                crop_height = buffer.height(),
                "Masked face crop"
            );
            (buffer, true)
        }
        None => {
            // No face: unmasked full-viewport frame.
            let buffer = draw_frame(frame, rect, zoom.mirrored, request.viewport)?;
            (buffer, false)
        }
    };

    if let Some(tone) = request.tone {
        *stage = CaptureStage::Toning;
        apply_tone(&mut buffer, tone);
    }

    // Overlay goes on last so it is never masked, recolored or mirrored.
    *stage = CaptureStage::Overlaying;
    draw_overlay(&mut buffer, request.overlay);

    *stage = CaptureStage::Done;
    Ok(CompositeOutput {
        buffer,
        frame_id: frame.id(),
        masked,
    })
}

/// Submit the frame for detection, await landmarks-or-none (stale results
/// are discarded by frame identity), then compose.
#[allow(clippy::too_many_arguments)]
pub async fn compose_with_detection(
    session: &DetectionSession,
    frame: Arc<Frame>,
    zoom: Option<ZoomState>,
    tone: Option<&ToneTransform>,
    overlay: &OverlayAsset,
    viewport: Viewport,
    config: &CaptureConfig,
) -> CaptureResult<CompositeOutput> {
    let pending = session.submit(frame.clone());
    let landmarks = pending.resolve(session).await?;
    let request = CompositeRequest {
        frame: &frame,
        landmarks: landmarks.as_ref(),
        zoom,
        tone,
        overlay,
        viewport,
    };
    compose(&request, config)
}
