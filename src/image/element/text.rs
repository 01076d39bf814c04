//! Text blocks anchored to a canvas corner.
//!
//! The message is rasterized into a coverage mask (word-wrapped and
//! left-aligned when a width is given), then `color` is painted through
//! the mask so anti-aliased edges keep their partial alpha.

use std::{fmt, str::FromStr};

use image::{GrayImage, Luma, RgbaImage};
use rusttype::{Font, Scale, point};
use serde::{Deserialize, Serialize};

use super::{Offset, composite};
use crate::image::{
    Color, ImageError,
    font::{FontBook, FontDescriptor},
};

/// Resolution used when a text block sets no DPI.
pub const DEFAULT_DPI: u32 = 72;

/// Canvas corner a text block is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gravity {
    #[default]
    Nw,
    Ne,
    Sw,
    Se,
}

impl Gravity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::Ne => "ne",
            Self::Sw => "sw",
            Self::Se => "se",
        }
    }

    /// Top-left corner of a `layer`-sized block on a `canvas`-sized image.
    ///
    /// The offset pushes the block inward from its anchor corner.
    pub fn origin(self, canvas: (u32, u32), layer: (u32, u32), offset: Offset) -> (i64, i64) {
        let (cw, ch) = (i64::from(canvas.0), i64::from(canvas.1));
        let (lw, lh) = (i64::from(layer.0), i64::from(layer.1));
        match self {
            Self::Nw => (offset.x, offset.y),
            Self::Ne => (cw - lw - offset.x, offset.y),
            Self::Sw => (offset.x, ch - lh - offset.y),
            Self::Se => (cw - lw - offset.x, ch - lh - offset.y),
        }
    }
}

impl FromStr for Gravity {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nw" => Ok(Self::Nw),
            "ne" => Ok(Self::Ne),
            "sw" => Ok(Self::Sw),
            "se" => Ok(Self::Se),
            _ => Err(ImageError::InvalidGravity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Gravity {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gravity> for String {
    fn from(gravity: Gravity) -> Self {
        gravity.as_str().to_string()
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub gravity: Gravity,
    /// Wrap width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
    pub color: Color,
    /// Font descriptor, e.g. `"Helvetica, Bold"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            gravity: Gravity::Nw,
            width: None,
            dpi: None,
            color: Color::BLACK,
            font: None,
        }
    }
}

/// A rendered text layer, ready to be composited.
#[derive(Debug, Clone)]
pub struct Text {
    layer: RgbaImage,
    gravity: Gravity,
}

impl Text {
    pub fn build(fonts: &FontBook, message: &str, options: &TextOptions) -> Result<Self, ImageError> {
        let descriptor = match options.font.as_deref() {
            Some(font) => font.parse::<FontDescriptor>()?,
            None => FontDescriptor::default(),
        };
        let font = fonts.resolve(&descriptor)?;

        let dpi = options.dpi.unwrap_or(DEFAULT_DPI) as f32;
        let scale = Scale::uniform(descriptor.pixel_size(dpi));
        let max_width = options.width.map(|w| w as f32);

        let lines = wrap_lines(&font, scale, message, max_width);
        let mask = rasterize(&font, scale, &lines);
        Ok(Self::from_mask(&mask, options.color, options.gravity))
    }

    /// Paint `color` through a coverage mask.
    pub fn from_mask(mask: &GrayImage, color: Color, gravity: Gravity) -> Self {
        let layer = RgbaImage::from_fn(mask.width(), mask.height(), |x, y| {
            color.with_alpha(mask.get_pixel(x, y).0[0])
        });
        Self { layer, gravity }
    }

    pub fn layer(&self) -> &RgbaImage {
        &self.layer
    }

    /// Composite the text onto `canvas`, returning the new canvas.
    pub fn apply<F>(&self, canvas: &RgbaImage, offset: F) -> RgbaImage
    where
        F: FnOnce(&RgbaImage, &RgbaImage) -> Offset,
    {
        let offset = offset(canvas, &self.layer);
        let (x, y) = self
            .gravity
            .origin(canvas.dimensions(), self.layer.dimensions(), offset);
        composite(canvas, &self.layer, x, y)
    }
}

/// Advance width of `text` on one line, kerning included.
fn line_width(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    let mut width = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        let glyph = font.glyph(ch).scaled(scale);
        if let Some(prev) = prev {
            width += font.pair_kerning(scale, prev, glyph.id());
        }
        width += glyph.h_metrics().advance_width;
        prev = Some(glyph.id());
    }
    width
}

/// Split `message` into lines.
///
/// Newlines always break and runs of whitespace collapse to one space.
/// With `max_width`, words are packed greedily; a word wider than the
/// limit gets a line of its own.
fn wrap_lines(font: &Font<'_>, scale: Scale, message: &str, max_width: Option<f32>) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in message.lines() {
        let Some(limit) = max_width else {
            lines.push(paragraph.split_whitespace().collect::<Vec<_>>().join(" "));
            continue;
        };

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if line_width(font, scale, &candidate) <= limit {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Rasterize `lines` into a coverage mask sized to the text block.
///
/// The block is the advance box of the widest line, widened to the glyph
/// ink where italics or side bearings reach past it. Ink left of the pen
/// origin shifts every line right by the same amount.
fn rasterize(font: &Font<'_>, scale: Scale, lines: &[String]) -> GrayImage {
    let metrics = font.v_metrics(scale);
    let line_height = (metrics.ascent - metrics.descent + metrics.line_gap)
        .ceil()
        .max(1.0);

    let glyphs: Vec<Vec<_>> = lines
        .iter()
        .enumerate()
        .map(|(row, line)| {
            let baseline = row as f32 * line_height + metrics.ascent;
            font.layout(line, scale, point(0.0, baseline)).collect()
        })
        .collect();

    let advance = lines
        .iter()
        .map(|line| line_width(font, scale, line))
        .fold(0.0_f32, f32::max)
        .ceil() as i32;
    let (ink_min, ink_max) = glyphs
        .iter()
        .flatten()
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .fold((0, advance), |(lo, hi), bb| (lo.min(bb.min.x), hi.max(bb.max.x)));
    let shift = -ink_min;

    let width = (ink_max - ink_min) as u32;
    let height = (line_height * lines.len() as f32) as u32;

    let mut mask = GrayImage::new(width, height);
    for glyph in glyphs.iter().flatten() {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + shift + gx as i32;
            let y = bb.min.y + gy as i32;
            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                return;
            }
            let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            let Luma([current]) = mask.get_pixel_mut(x as u32, y as u32);
            *current = current.saturating_add(value);
        });
    }
    mask
}
