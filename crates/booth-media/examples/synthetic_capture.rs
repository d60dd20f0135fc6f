//! Demo: compose a synthetic capture and write it as a PNG.
//!
//! Run with: cargo run -p booth-media --example synthetic_capture

use booth_media::{
    compose, encode_png, photo_filename, resolve_request_zoom, CaptureConfig, CompositeRequest,
    Frame, OverlayAsset,
};
use booth_models::{ToneTransform, Viewport};
use chrono::Utc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A 640x480 gradient stands in for a camera frame.
    let mut data = Vec::with_capacity(640 * 480 * 4);
    for y in 0..480u32 {
        for x in 0..640u32 {
            data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 160, 255]);
        }
    }
    let frame = Frame::new(640, 480, data)?;

    // Semi-transparent border overlay.
    let mut overlay_data = vec![0u8; 400 * 800 * 4];
    for y in 0..800usize {
        for x in 0..400usize {
            if x < 12 || x >= 388 || y < 12 || y >= 788 {
                let idx = (y * 400 + x) * 4;
                overlay_data[idx..idx + 4].copy_from_slice(&[240, 200, 40, 220]);
            }
        }
    }
    let overlay = OverlayAsset::from_rgba(400, 800, overlay_data)?;

    let config = CaptureConfig::default();
    // Webcam with no hardware zoom, slider at -2 => 0.5x software zoom-out.
    let zoom = resolve_request_zoom(-2.0, false, true, &config)?;

    let tone = ToneTransform::sepia();
    let request = CompositeRequest {
        frame: &frame,
        landmarks: None,
        zoom: Some(zoom),
        tone: Some(&tone),
        overlay: &overlay,
        viewport: Viewport::new(400, 800),
    };
    let output = compose(&request, &config)?;

    let png = encode_png(&output.buffer)?;
    let filename = photo_filename(Utc::now());
    std::fs::write(&filename, png)?;
    println!(
        "wrote {} ({}x{}, masked: {})",
        filename,
        output.buffer.width(),
        output.buffer.height(),
        output.masked
    );
    Ok(())
}
