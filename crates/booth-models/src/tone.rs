//! Linear tone transforms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A linear RGB remapping: `rgb' = matrix * rgb + bias`, per pixel.
///
/// The matrix is row-major; bias is in channel units (0-255 scale). Alpha is
/// never touched by a tone transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToneTransform {
    /// 3x3 color matrix, rows = output channels (R, G, B).
    pub matrix: [[f32; 3]; 3],
    /// Per-channel additive bias.
    pub bias: [f32; 3],
}

impl ToneTransform {
    /// Create a transform from a matrix and bias.
    pub fn new(matrix: [[f32; 3]; 3], bias: [f32; 3]) -> Self {
        Self { matrix, bias }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [0.0, 0.0, 0.0],
        )
    }

    /// True for an exact identity matrix with zero bias.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Luminance-weighted grayscale (ITU-R BT.601 coefficients).
    pub fn grayscale() -> Self {
        const L: [f32; 3] = [0.299, 0.587, 0.114];
        Self::new([L, L, L], [0.0, 0.0, 0.0])
    }

    /// Classic warm sepia tint.
    pub fn sepia() -> Self {
        Self::new(
            [
                [0.393, 0.769, 0.189],
                [0.349, 0.686, 0.168],
                [0.272, 0.534, 0.131],
            ],
            [0.0, 0.0, 0.0],
        )
    }

    /// Apply the transform to one RGB triple, saturating to `[0, 255]`.
    pub fn apply_rgb(&self, r: u8, g: u8, b: u8) -> (u8, u8, u8) {
        let input = [r as f32, g as f32, b as f32];
        let mut out = [0u8; 3];
        for (channel, row) in self.matrix.iter().enumerate() {
            let v = row[0] * input[0] + row[1] * input[1] + row[2] * input[2]
                + self.bias[channel];
            out[channel] = v.round().clamp(0.0, 255.0) as u8;
        }
        (out[0], out[1], out[2])
    }
}

impl Default for ToneTransform {
    fn default() -> Self {
        Self::identity()
    }
}
