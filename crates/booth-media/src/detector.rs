//! Landmark detector boundary.
//!
//! The detector itself is external (a neural face-mesh model or a remote
//! service); the pipeline only sees `frame -> Option<LandmarkSet>`. Because
//! detection is asynchronous and frames keep arriving, a result can come
//! back after a newer frame has already been submitted. Such a result must
//! be discarded, never applied to a stale frame. `DetectionSession` keys
//! every pending detection by frame identity so staleness is a simple
//! equality check, with no ambient flags.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use booth_models::{FrameId, LandmarkSet};
use metrics::counter;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{CaptureError, CaptureResult};
use crate::frame::Frame;

/// External landmark detection, invoked at most once per frame.
#[async_trait]
pub trait LandmarkDetector: Send + Sync {
    /// Detect facial landmarks in a frame.
    ///
    /// # Returns
    /// `Ok(Some(..))` for a detected face, `Ok(None)` when no face was
    /// found (a valid outcome, not an error).
    async fn detect(&self, frame: &Frame) -> CaptureResult<Option<LandmarkSet>>;

    /// Detector name for logging.
    fn name(&self) -> &'static str;
}

/// Single-resolution handle for one in-flight detection.
pub struct PendingLandmarks {
    frame_id: FrameId,
    rx: oneshot::Receiver<CaptureResult<Option<LandmarkSet>>>,
}

impl PendingLandmarks {
    /// Identity of the frame this detection belongs to.
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    /// Await the detection result.
    ///
    /// When a newer frame was submitted to the session after this one, the
    /// result is discarded and `Ok(None)` is returned; the capture falls
    /// back to the unmasked path rather than masking with stale landmarks.
    pub async fn resolve(self, session: &DetectionSession) -> CaptureResult<Option<LandmarkSet>> {
        let result = self
            .rx
            .await
            .map_err(|_| CaptureError::internal("detector task dropped its result channel"))?;

        if session.latest_frame() != Some(self.frame_id) {
            counter!("booth_detections_stale_total").increment(1);
            debug!(frame = %self.frame_id, "Discarding superseded detection result");
            return Ok(None);
        }
        result
    }
}

/// Tracks the latest submitted frame and spawns detections.
///
/// Supersession is the only cancellation mechanism: submitting a new frame
/// does not abort the previous detection task, it just guarantees the old
/// result will be dropped on resolution.
pub struct DetectionSession {
    detector: Arc<dyn LandmarkDetector>,
    latest: Mutex<Option<FrameId>>,
}

impl DetectionSession {
    /// Create a session around a detector.
    pub fn new(detector: Arc<dyn LandmarkDetector>) -> Self {
        Self {
            detector,
            latest: Mutex::new(None),
        }
    }

    /// Identity of the most recently submitted frame.
    pub fn latest_frame(&self) -> Option<FrameId> {
        *self.latest.lock().expect("latest frame lock poisoned")
    }

    /// Submit a frame for detection, superseding any earlier submission.
    pub fn submit(&self, frame: Arc<Frame>) -> PendingLandmarks {
        let frame_id = frame.id();
        *self.latest.lock().expect("latest frame lock poisoned") = Some(frame_id);

        let (tx, rx) = oneshot::channel();
        let detector = self.detector.clone();
        tokio::spawn(async move {
            let result = detector.detect(&frame).await;
            if let Err(err) = &result {
                warn!(frame = %frame.id(), error = %err, "Landmark detection failed");
            }
            // The receiver may be gone when the caller abandoned the
            // capture; that is fine.
            let _ = tx.send(result);
        });

        debug!(
            frame = %frame_id,
            detector = self.detector.name(),
            "Submitted frame for landmark detection"
        );
        PendingLandmarks { frame_id, rx }
    }
}
