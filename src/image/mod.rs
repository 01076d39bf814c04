//! Image composition.
//!
//! # Modules
//!
//! - [`color`]: `#RRGGBB` parsing
//! - [`element`]: text and border layers
//! - [`font`]: font discovery, descriptors, face cache
//!
//! [`Image`] is the entry point: it owns one canvas and replaces it with a
//! freshly composited copy on every successful element call.
//!
//! ```ignore
//! let fonts = FontBook::system();
//! let mut image = Image::blank(1200, 600, &fonts);
//! image
//!     .border(20, &BorderOptions::new(Position::Bottom, Fill::Solid(Color::BLACK)))?
//!     .text("Hi", &TextOptions::default())?;
//! image.save("hi.png")?;
//! ```

pub mod color;
pub mod element;
mod error;
pub mod font;

pub use color::Color;
pub use element::{Border, BorderOptions, Fill, Gravity, Offset, Position, Text, TextOptions};
pub use error::ImageError;
pub use font::{FontBook, FontSources};

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

/// Canvas builder with chainable text and border calls.
pub struct Image<'f> {
    canvas: RgbaImage,
    fonts: &'f FontBook,
}

impl<'f> Image<'f> {
    /// A `width x height` canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color, fonts: &'f FontBook) -> Self {
        Self {
            canvas: RgbaImage::from_pixel(width, height, background.opaque()),
            fonts,
        }
    }

    /// A white canvas.
    pub fn blank(width: u32, height: u32, fonts: &'f FontBook) -> Self {
        Self::new(width, height, Color::WHITE, fonts)
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn text(&mut self, message: &str, options: &TextOptions) -> Result<&mut Self, ImageError> {
        self.text_with(message, options, |_, _| Offset::ZERO)
    }

    /// Draw text, nudged by `offset(canvas, text_layer)`.
    pub fn text_with<F>(
        &mut self,
        message: &str,
        options: &TextOptions,
        offset: F,
    ) -> Result<&mut Self, ImageError>
    where
        F: FnOnce(&RgbaImage, &RgbaImage) -> Offset,
    {
        let text = Text::build(self.fonts, message, options)?;
        self.canvas = text.apply(&self.canvas, offset);
        Ok(self)
    }

    pub fn border(&mut self, size: u32, options: &BorderOptions) -> Result<&mut Self, ImageError> {
        self.border_with(size, options, |_, _| Offset::ZERO)
    }

    /// Draw a border, nudged by `offset(canvas, border_layer)`.
    pub fn border_with<F>(
        &mut self,
        size: u32,
        options: &BorderOptions,
        offset: F,
    ) -> Result<&mut Self, ImageError>
    where
        F: FnOnce(&RgbaImage, &RgbaImage) -> Offset,
    {
        let border = Border::build(&self.canvas, size, options)?;
        self.canvas = border.apply(&self.canvas, offset);
        Ok(self)
    }

    /// Encode by file extension (PNG when unknown) and write to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        let format = output_format(path);
        self.save_with_format(path, format)
    }

    /// Encode as `format` and write to `path`. The parent directory must exist.
    pub fn save_with_format(&self, path: impl AsRef<Path>, format: ImageFormat) -> Result<(), ImageError> {
        let path = path.as_ref();
        // The canvas is opaque; drop alpha so every encoder accepts it.
        let flat = DynamicImage::ImageRgba8(self.canvas.clone()).into_rgb8();
        flat.save_with_format(path, format)
            .map_err(|e| ImageError::Io(path.to_path_buf(), e))
    }
}

/// Output format for `path`, by extension.
pub fn output_format(path: &Path) -> ImageFormat {
    match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP)) => format,
        _ => ImageFormat::Png,
    }
}
