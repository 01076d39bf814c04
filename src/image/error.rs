//! Image composition error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or saving an image.
///
/// Validation variants are raised by the call that receives the bad input,
/// before any canvas is touched.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("invalid color `{0}`, expected `#RRGGBB`")]
    InvalidColorFormat(String),

    #[error("invalid border position `{0}`, expected one of: top, bottom, left, right")]
    InvalidPosition(String),

    #[error("invalid text gravity `{0}`, expected one of: nw, ne, sw, se")]
    InvalidGravity(String),

    #[error("border fill needs at least one color")]
    EmptyFill,

    #[error("cannot resolve font `{descriptor}`: {reason}")]
    FontResolution { descriptor: String, reason: String },

    #[error("failed to write `{0}`")]
    Io(PathBuf, #[source] image::ImageError),
}

impl ImageError {
    pub fn font(descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FontResolution {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }
}
