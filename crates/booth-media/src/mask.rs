//! Face mask rasterization and feathering.
//!
//! The mask is a single-channel buffer at frame resolution: 255 inside the
//! contour polygon, 0 outside. Feathering blurs a copy of the filled mask
//! and then stamps the sharp fill back on top, so only the outside edge
//! gains a soft falloff while the interior stays fully opaque.

use rayon::prelude::*;

/// Single-channel opacity buffer with the dimensions of its source frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MaskBuffer {
    /// All-zero mask.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize],
        }
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw mask bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Opacity at `(x, y)`.
    pub fn value(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// True when no pixel is covered.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }
}

/// Rasterize the contour polygon into a mask, optionally feathered.
///
/// The polygon is filled with an even-odd scanline pass, vertices taken in
/// the order given (the contour's natural winding is never re-sorted). A
/// `feather_radius` above zero applies a separable box blur of that radius
/// and then re-stamps the unblurred fill, keeping the mask core opaque.
/// A polygon whose bounds enclose no pixel yields an all-zero mask.
pub fn build_mask(
    polygon: &[(f64, f64)],
    width: u32,
    height: u32,
    feather_radius: u32,
) -> MaskBuffer {
    let mut mask = MaskBuffer::blank(width, height);
    if polygon.len() < 3 || width == 0 || height == 0 {
        return mask;
    }

    fill_polygon(&mut mask, polygon);
    if mask.is_blank() {
        return mask;
    }

    if feather_radius > 0 {
        let sharp = mask.data.clone();
        box_blur(&mut mask.data, width as usize, height as usize, feather_radius as usize);
        // Second pass: the sharp fill goes back on top of the blur so the
        // interior never washes out; only pixels outside the fill keep the
        // blurred falloff.
        for (dst, &src) in mask.data.iter_mut().zip(sharp.iter()) {
            *dst = (*dst).max(src);
        }
    }

    mask
}

/// Even-odd scanline fill at pixel centers.
fn fill_polygon(mask: &mut MaskBuffer, polygon: &[(f64, f64)]) {
    let width = mask.width as usize;
    let mut crossings: Vec<f64> = Vec::with_capacity(polygon.len());

    for y in 0..mask.height as usize {
        let yc = y as f64 + 0.5;
        crossings.clear();

        for i in 0..polygon.len() {
            let (x1, y1) = polygon[i];
            let (x2, y2) = polygon[(i + 1) % polygon.len()];
            // Half-open test so a vertex on the scanline counts once.
            if (y1 <= yc && y2 > yc) || (y2 <= yc && y1 > yc) {
                let t = (yc - y1) / (y2 - y1);
                crossings.push(x1 + t * (x2 - x1));
            }
        }

        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let row = &mut mask.data[y * width..(y + 1) * width];
        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil().max(0.0) as usize;
            let end = ((span[1] - 0.5).ceil().max(0.0) as usize).min(width);
            if start < end {
                row[start..end].fill(255);
            }
        }
    }
}

/// Separable box blur with zero padding outside the buffer.
fn box_blur(data: &mut [u8], width: usize, height: usize, radius: usize) {
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    let kernel = 2 * radius + 1;
    let mut scratch = vec![0u8; data.len()];

    // Horizontal pass, rows are independent.
    scratch
        .par_chunks_mut(width)
        .zip(data.par_chunks(width))
        .for_each(|(out_row, in_row)| {
            let mut sum: u32 = in_row.iter().take(radius + 1).map(|&v| v as u32).sum();
            for x in 0..width {
                out_row[x] = (sum / kernel as u32) as u8;
                if x + radius + 1 < width {
                    sum += in_row[x + radius + 1] as u32;
                }
                if x >= radius {
                    sum -= in_row[x - radius] as u32;
                }
            }
        });

    // Vertical pass.
    for x in 0..width {
        let mut sum: u32 = (0..(radius + 1).min(height))
            .map(|y| scratch[y * width + x] as u32)
            .sum();
        for y in 0..height {
            data[y * width + x] = (sum / kernel as u32) as u8;
            if y + radius + 1 < height {
                sum += scratch[(y + radius + 1) * width + x] as u32;
            }
            if y >= radius {
                sum -= scratch[(y - radius) * width + x] as u32;
            }
        }
    }
}
