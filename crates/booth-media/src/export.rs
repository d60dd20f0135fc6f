//! PNG export boundary.
//!
//! Encoding is not part of the compositing core; this module adapts a
//! finished `PixelBuffer` for callers that want PNG bytes or a stable
//! upload file name.

use chrono::{DateTime, Utc};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};

use crate::error::{CaptureError, CaptureResult};
use crate::frame::PixelBuffer;

/// Encode a composite as PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> CaptureResult<Vec<u8>> {
    if buffer.is_empty() {
        return Err(CaptureError::DegenerateFrame {
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        buffer.data(),
        buffer.width(),
        buffer.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Upload file name for a captured photo: `photo-<epoch millis>.png`.
pub fn photo_filename(taken_at: DateTime<Utc>) -> String {
    format!("photo-{}.png", taken_at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_png_round_trip() {
        let mut buffer = PixelBuffer::transparent(3, 2);
        buffer.set_pixel(1, 1, [200, 100, 50, 255]);

        let bytes = encode_png(&buffer).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [200, 100, 50, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let buffer = PixelBuffer::transparent(0, 0);
        assert!(matches!(
            encode_png(&buffer),
            Err(CaptureError::DegenerateFrame { .. })
        ));
    }

    #[test]
    fn test_filename_uses_epoch_millis() {
        let time = Utc.timestamp_millis_opt(1_762_431_140_000).unwrap();
        assert_eq!(photo_filename(time), "photo-1762431140000.png");
    }
}
