//! Canvas elements.
//!
//! Each element renders its own layer first (`build`), then composites that
//! layer onto a canvas (`apply`). Placement can be nudged by an offset
//! callback that sees both the canvas and the measured layer.

pub mod border;
pub mod text;

pub use border::{Border, BorderOptions, Fill, Position};
pub use text::{Gravity, Text, TextOptions};

use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};

/// Pixel nudge applied on top of an element's anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Return a copy of `canvas` with `layer` drawn over it at `(x, y)`.
///
/// Source-over blending; parts of the layer outside the canvas are clipped.
fn composite(canvas: &RgbaImage, layer: &RgbaImage, x: i64, y: i64) -> RgbaImage {
    let mut out = canvas.clone();
    imageops::overlay(&mut out, layer, x, y);
    out
}
