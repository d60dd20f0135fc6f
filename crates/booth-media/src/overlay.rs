//! Branded overlay asset loading.
//!
//! The overlay is a static RGBA bitmap painted over every composite. The
//! pipeline treats it as an already-decoded buffer; this module is the
//! boundary that resolves the asset path, decodes the image and folds the
//! configured opacity into the alpha channel.

use std::path::Path;

use tracing::debug;

use crate::error::{CaptureError, CaptureResult};
use crate::frame::BYTES_PER_PIXEL;

/// Default overlay asset path in the production container.
pub const DEFAULT_OVERLAY_PATH: &str = "/app/assets/overlay.png";

/// Development fallback paths to check.
const DEV_OVERLAY_PATHS: &[&str] = &[
    "./assets/overlay.png",
    "../assets/overlay.png",
    "assets/overlay.png",
];

/// A decoded RGBA overlay bitmap.
#[derive(Debug, Clone)]
pub struct OverlayAsset {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl OverlayAsset {
    /// Wrap already-decoded RGBA bytes.
    ///
    /// # Errors
    /// `EmptyOverlay` for zero dimensions, `BufferSizeMismatch` when the
    /// byte count does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> CaptureResult<Self> {
        if width == 0 || height == 0 || data.is_empty() {
            return Err(CaptureError::EmptyOverlay);
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(CaptureError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Overlay width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Overlay height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Configuration for the overlay asset.
///
/// Use the builder pattern for flexible configuration:
/// ```ignore
/// let overlay = OverlayConfig::default()
///     .with_image_path("branding/frame.png")
///     .with_opacity(0.8)
///     .load()?;
/// ```
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Path to the overlay image (PNG with transparency)
    pub image_path: String,
    /// Opacity (0.0 to 1.0), folded into the alpha channel on load
    pub opacity: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            image_path: resolve_overlay_path(),
            opacity: 1.0,
        }
    }
}

impl OverlayConfig {
    /// Create config with a custom image path.
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = path.into();
        self
    }

    /// Set overlay opacity (0.0 = invisible, 1.0 = fully opaque).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Check if the overlay image exists.
    pub fn is_available(&self) -> bool {
        Path::new(&self.image_path).exists()
    }

    /// Decode the overlay, scaling alpha by the configured opacity.
    pub fn load(&self) -> CaptureResult<OverlayAsset> {
        let decoded = image::open(&self.image_path)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        let mut data = decoded.into_raw();

        if self.opacity < 1.0 {
            for px in data.chunks_exact_mut(BYTES_PER_PIXEL) {
                px[3] = (px[3] as f32 * self.opacity).round() as u8;
            }
        }

        debug!(
            path = %self.image_path,
            width,
            height,
            opacity = self.opacity,
            "Loaded overlay asset"
        );
        OverlayAsset::from_rgba(width, height, data)
    }
}

/// Resolve the overlay path, checking dev fallbacks if the production path
/// is missing.
fn resolve_overlay_path() -> String {
    if Path::new(DEFAULT_OVERLAY_PATH).exists() {
        return DEFAULT_OVERLAY_PATH.to_string();
    }
    for path in DEV_OVERLAY_PATHS {
        if Path::new(path).exists() {
            debug!(path = path, "Found overlay at dev fallback path");
            return path.to_string();
        }
    }
    DEFAULT_OVERLAY_PATH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            OverlayAsset::from_rgba(0, 10, vec![]),
            Err(CaptureError::EmptyOverlay)
        ));
        assert!(matches!(
            OverlayAsset::from_rgba(10, 10, vec![]),
            Err(CaptureError::EmptyOverlay)
        ));
    }

    #[test]
    fn test_byte_count_checked() {
        assert!(matches!(
            OverlayAsset::from_rgba(2, 2, vec![0u8; 10]),
            Err(CaptureError::BufferSizeMismatch { expected: 16, actual: 10 })
        ));
    }

    #[test]
    fn test_opacity_clamping() {
        let config = OverlayConfig::default().with_opacity(1.5);
        assert!((config.opacity - 1.0).abs() < f32::EPSILON);
        let config = OverlayConfig::default().with_opacity(-0.5);
        assert!(config.opacity.abs() < f32::EPSILON);
    }

    #[test]
    fn test_is_available_false_for_missing() {
        let config = OverlayConfig::default().with_image_path("/nonexistent/overlay.png");
        assert!(!config.is_available());
    }

    #[test]
    fn test_load_folds_opacity_into_alpha() {
        // Write a tiny PNG to a temp dir and load it at half opacity.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.png");
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 200]));
        img.save(&path).unwrap();

        let asset = OverlayConfig::default()
            .with_image_path(path.to_string_lossy())
            .with_opacity(0.5)
            .load()
            .unwrap();
        assert_eq!(asset.width(), 2);
        assert_eq!(asset.data()[3], 100);
        // RGB is untouched by opacity.
        assert_eq!(asset.data()[0], 10);
    }
}
