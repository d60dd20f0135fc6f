//! Pixel compositing: masked crops, placed frame draws and overlay blends.
//!
//! Draw order is a hard invariant of the pipeline: frame first, face-mask
//! crop second, tone transform third, overlay asset last. The overlay is
//! always drawn right-reading; mirroring applies to the frame draw only.

use booth_models::{BoundingBox, Viewport};

use crate::error::{CaptureError, CaptureResult};
use crate::frame::{Frame, PixelBuffer};
use crate::geometry::DrawRect;
use crate::mask::MaskBuffer;
use crate::overlay::OverlayAsset;

/// Crop the frame to `crop`, keeping only pixels the mask covers.
///
/// Output alpha is `source alpha x mask / 255`; RGB is copied where the mask
/// is nonzero and transparent black elsewhere ("keep intersection"). The
/// output buffer takes the crop box's dimensions, which may be zero for a
/// degenerate box.
pub fn composite_masked(
    frame: &Frame,
    mask: &MaskBuffer,
    crop: &BoundingBox,
) -> CaptureResult<PixelBuffer> {
    if mask.width() != frame.width() || mask.height() != frame.height() {
        return Err(CaptureError::BufferSizeMismatch {
            expected: frame.width() as usize * frame.height() as usize,
            actual: mask.data().len(),
        });
    }

    let crop = crop.clamped(frame.width() as f64, frame.height() as f64);
    let x0 = crop.x.round() as u32;
    let y0 = crop.y.round() as u32;
    let width = (crop.width.round() as u32).min(frame.width() - x0);
    let height = (crop.height.round() as u32).min(frame.height() - y0);

    let mut out = PixelBuffer::transparent(width, height);
    for y in 0..height {
        for x in 0..width {
            let fx = x0 + x;
            let fy = y0 + y;
            let coverage = mask.value(fx, fy);
            if coverage == 0 {
                continue;
            }
            let [r, g, b, a] = frame.pixel(fx, fy);
            let alpha = ((a as u16 * coverage as u16 + 127) / 255) as u8;
            out.set_pixel(x, y, [r, g, b, alpha]);
        }
    }
    Ok(out)
}

/// Draw the frame into a viewport-sized buffer at the given placement rect.
///
/// Pixels outside the rect stay transparent. When `mirrored`, the draw is
/// flipped about the viewport's vertical centerline before anything else is
/// painted on top.
pub fn draw_frame(
    frame: &Frame,
    rect: DrawRect,
    mirrored: bool,
    viewport: Viewport,
) -> CaptureResult<PixelBuffer> {
    if viewport.is_empty() {
        return Err(CaptureError::DegenerateFrame {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(CaptureError::internal(format!(
            "draw rect has non-positive size {}x{}",
            rect.width, rect.height
        )));
    }

    let mut out = PixelBuffer::transparent(viewport.width, viewport.height);
    for y in 0..viewport.height {
        let v = (y as f64 + 0.5 - rect.y) / rect.height;
        if !(0.0..1.0).contains(&v) {
            continue;
        }
        let sy = v * frame.height() as f64 - 0.5;
        for x in 0..viewport.width {
            // Mirroring reflects which output column reads which source
            // column; the sampled content itself is unchanged.
            let xs = if mirrored {
                viewport.width - 1 - x
            } else {
                x
            };
            let u = (xs as f64 + 0.5 - rect.x) / rect.width;
            if !(0.0..1.0).contains(&u) {
                continue;
            }
            let sx = u * frame.width() as f64 - 0.5;
            let rgba = bilinear(frame.data(), frame.width(), frame.height(), sx, sy);
            out.set_pixel(x, y, rgba);
        }
    }
    Ok(out)
}

/// Scale the overlay to fill the destination and alpha-blend it on top.
///
/// The overlay is never mirrored or recolored; it is painted last and stays
/// right-reading.
pub fn draw_overlay(dst: &mut PixelBuffer, overlay: &OverlayAsset) {
    if dst.is_empty() {
        return;
    }
    let dw = dst.width();
    let dh = dst.height();
    for y in 0..dh {
        let sy = (y as f64 + 0.5) / dh as f64 * overlay.height() as f64 - 0.5;
        for x in 0..dw {
            let sx = (x as f64 + 0.5) / dw as f64 * overlay.width() as f64 - 0.5;
            let src = bilinear(overlay.data(), overlay.width(), overlay.height(), sx, sy);
            if src[3] == 0 {
                continue;
            }
            let blended = blend_over(dst.pixel(x, y), src);
            dst.set_pixel(x, y, blended);
        }
    }
}

/// Compose a live (unmasked) capture: frame at its zoomed placement, then
/// the overlay scaled to the viewport on top.
pub fn composite_live_capture(
    frame: &Frame,
    rect: DrawRect,
    mirrored: bool,
    overlay: &OverlayAsset,
    viewport: Viewport,
) -> CaptureResult<PixelBuffer> {
    let mut out = draw_frame(frame, rect, mirrored, viewport)?;
    draw_overlay(&mut out, overlay);
    Ok(out)
}

/// Source-over blend with straight alpha.
fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as f64 / 255.0;
    let da = dst[3] as f64 / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let sc = src[c] as f64;
        let dc = dst[c] as f64;
        out[c] = ((sc * sa + dc * da * (1.0 - sa)) / oa).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (oa * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

/// Bilinear sample of an RGBA buffer at fractional coordinates, edges
/// clamped.
fn bilinear(data: &[u8], width: u32, height: u32, sx: f64, sy: f64) -> [u8; 4] {
    let max_x = (width - 1) as f64;
    let max_y = (height - 1) as f64;
    let sx = sx.clamp(0.0, max_x);
    let sy = sy.clamp(0.0, max_y);

    let x0 = sx.floor() as u32;
    let y0 = sy.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = sx - x0 as f64;
    let fy = sy - y0 as f64;

    let at = |x: u32, y: u32| {
        let idx = (y as usize * width as usize + x as usize) * 4;
        [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
    };
    let p00 = at(x0, y0);
    let p10 = at(x1, y0);
    let p01 = at(x0, y1);
    let p11 = at(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use crate::mask::build_mask;

    /// Solid-color frame helper.
    fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> Frame {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&rgba);
        }
        Frame::new(width, height, data).unwrap()
    }

    fn full_mask(width: u32, height: u32) -> MaskBuffer {
        build_mask(
            &[
                (-1.0, -1.0),
                (width as f64 + 1.0, -1.0),
                (width as f64 + 1.0, height as f64 + 1.0),
                (-1.0, height as f64 + 1.0),
            ],
            width,
            height,
            0,
        )
    }

    #[test]
    fn test_masked_with_blank_mask_is_transparent() {
        let frame = solid_frame(32, 32, [200, 100, 50, 255]);
        let mask = MaskBuffer::blank(32, 32);
        let crop = BoundingBox::new(8.0, 8.0, 16.0, 16.0);
        let out = composite_masked(&frame, &mask, &crop).unwrap();
        assert_eq!(out.width(), 16);
        assert_eq!(out.height(), 16);
        assert!(out.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_masked_with_full_mask_copies_source() {
        let frame = solid_frame(32, 32, [200, 100, 50, 255]);
        let mask = full_mask(32, 32);
        let crop = BoundingBox::new(8.0, 8.0, 16.0, 16.0);
        let out = composite_masked(&frame, &mask, &crop).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(out.pixel(x, y), [200, 100, 50, 255]);
            }
        }
    }

    #[test]
    fn test_masked_alpha_scales_with_coverage() {
        let frame = solid_frame(32, 32, [10, 20, 30, 255]);
        // A feathered mask carries partial coverage just outside the fill.
        let mask = build_mask(
            &[(8.0, 8.0), (24.0, 8.0), (24.0, 24.0), (8.0, 24.0)],
            32,
            32,
            4,
        );
        let crop = BoundingBox::new(0.0, 0.0, 32.0, 32.0);
        let out = composite_masked(&frame, &mask, &crop).unwrap();

        let coverage = mask.value(6, 16);
        assert!(coverage > 0 && coverage < 255);
        // Fully opaque source: output alpha equals the mask coverage.
        assert_eq!(out.pixel(6, 16)[3], coverage);
        assert_eq!(out.pixel(6, 16)[0], 10);
    }

    #[test]
    fn test_masked_mismatched_mask_rejected() {
        let frame = solid_frame(8, 8, [0, 0, 0, 255]);
        let mask = MaskBuffer::blank(4, 4);
        let crop = BoundingBox::new(0.0, 0.0, 8.0, 8.0);
        assert!(matches!(
            composite_masked(&frame, &mask, &crop),
            Err(CaptureError::BufferSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_masked_degenerate_crop_is_empty() {
        let frame = solid_frame(8, 8, [9, 9, 9, 255]);
        let mask = full_mask(8, 8);
        let crop = BoundingBox::new(4.0, 4.0, 0.0, 0.0);
        let out = composite_masked(&frame, &mask, &crop).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_draw_frame_fills_viewport_under_cover_fit() {
        let frame = solid_frame(64, 48, [50, 150, 250, 255]);
        let viewport = Viewport::new(32, 32);
        let rect = geometry::fit_cover(64, 48, 32, 32).unwrap();
        let out = draw_frame(&frame, rect, false, viewport).unwrap();
        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(out.pixel(x, y), [50, 150, 250, 255]);
            }
        }
    }

    #[test]
    fn test_draw_frame_zoom_out_leaves_transparent_border() {
        let frame = solid_frame(40, 40, [255, 0, 0, 255]);
        let viewport = Viewport::new(40, 40);
        let rect = geometry::apply_zoom(geometry::fit_cover(40, 40, 40, 40).unwrap(), 0.5);
        let out = draw_frame(&frame, rect, false, viewport).unwrap();
        // Center is painted, corners are not.
        assert_eq!(out.pixel(20, 20)[3], 255);
        assert_eq!(out.pixel(0, 0)[3], 0);
        assert_eq!(out.pixel(39, 39)[3], 0);
    }

    #[test]
    fn test_mirror_reflects_marker_about_centerline() {
        // Left half red, right half blue.
        let mut data = Vec::new();
        for _y in 0..16 {
            for x in 0..16 {
                if x < 8 {
                    data.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        let frame = Frame::new(16, 16, data).unwrap();
        let viewport = Viewport::new(16, 16);
        let rect = geometry::fit_cover(16, 16, 16, 16).unwrap();

        let plain = draw_frame(&frame, rect, false, viewport).unwrap();
        let flipped = draw_frame(&frame, rect, true, viewport).unwrap();

        assert_eq!(plain.pixel(2, 8), [255, 0, 0, 255]);
        assert_eq!(flipped.pixel(2, 8), [0, 0, 255, 255]);
        // Mirror of column x reads column width-1-x.
        for x in 0..16 {
            assert_eq!(plain.pixel(x, 4), flipped.pixel(15 - x, 4));
        }
    }

    #[test]
    fn test_overlay_drawn_on_top_and_unmirrored() {
        let frame = solid_frame(16, 16, [0, 255, 0, 255]);
        let viewport = Viewport::new(16, 16);
        let rect = geometry::fit_cover(16, 16, 16, 16).unwrap();

        // Overlay: opaque white left column, transparent elsewhere.
        let mut odata = vec![0u8; 16 * 16 * 4];
        for y in 0..16usize {
            let idx = y * 16 * 4;
            odata[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
        let overlay = OverlayAsset::from_rgba(16, 16, odata).unwrap();

        let plain = composite_live_capture(&frame, rect, false, &overlay, viewport).unwrap();
        let mirrored = composite_live_capture(&frame, rect, true, &overlay, viewport).unwrap();

        // The overlay column lands on the left in both runs.
        assert_eq!(plain.pixel(0, 8), [255, 255, 255, 255]);
        assert_eq!(mirrored.pixel(0, 8), [255, 255, 255, 255]);
        // Overlay pixels identical between mirrored and plain runs.
        for y in 0..16 {
            assert_eq!(plain.pixel(0, y), mirrored.pixel(0, y));
        }
        // Away from the overlay the frame shows through.
        assert_eq!(plain.pixel(8, 8), [0, 255, 0, 255]);
    }

    #[test]
    fn test_blend_over_semi_transparent() {
        let dst = [0, 0, 0, 255];
        let src = [255, 255, 255, 128];
        let out = blend_over(dst, src);
        assert_eq!(out[3], 255);
        // Roughly half-bright gray.
        assert!((out[0] as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_blend_over_transparent_source_keeps_dst() {
        let dst = [1, 2, 3, 200];
        assert_eq!(blend_over(dst, [9, 9, 9, 0]), dst);
    }
}
