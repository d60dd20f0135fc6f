//! Tone transform application.

use booth_models::ToneTransform;
use rayon::prelude::*;

use crate::frame::{PixelBuffer, BYTES_PER_PIXEL};

/// Apply a linear tone transform to every pixel of a buffer in place.
///
/// Each RGB triple becomes `matrix * rgb + bias`, clamped per channel to
/// `[0, 255]` (saturating, never wrapping). Alpha is left untouched, so
/// transparency produced by masking survives recoloring. Runs before any
/// overlay draw so overlay pixels are never recolored.
pub fn apply_tone(buffer: &mut PixelBuffer, tone: &ToneTransform) {
    if tone.is_identity() || buffer.is_empty() {
        return;
    }

    let width = buffer.width() as usize;
    buffer
        .data_mut()
        .par_chunks_mut(width * BYTES_PER_PIXEL)
        .for_each(|row| {
            for px in row.chunks_exact_mut(BYTES_PER_PIXEL) {
                let (r, g, b) = tone.apply_rgb(px[0], px[1], px[2]);
                px[0] = r;
                px[1] = g;
                px[2] = b;
            }
        });
}
