//! `#RRGGBB` color parsing.

use std::{fmt, str::FromStr, sync::LazyLock};

use image::Rgba;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ImageError;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$").unwrap());

/// An opaque 8-bit RGB color.
///
/// Parsed from (and displayed as) `#RRGGBB`. Deserializes from the same
/// string form so config files can carry colors directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Self = Self([0xff, 0xff, 0xff]);
    pub const BLACK: Self = Self([0x00, 0x00, 0x00]);

    /// The color with the given alpha.
    pub const fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        let [r, g, b] = self.0;
        Rgba([r, g, b, alpha])
    }

    pub const fn opaque(self) -> Rgba<u8> {
        self.with_alpha(u8::MAX)
    }
}

/// Parse a `#RRGGBB` string into its three channel values.
pub fn parse_hex_color(input: &str) -> Result<Color, ImageError> {
    let caps = HEX_COLOR
        .captures(input)
        .ok_or_else(|| ImageError::InvalidColorFormat(input.to_string()))?;

    let mut channels = [0_u8; 3];
    for (channel, cap) in channels.iter_mut().zip(caps.iter().skip(1)) {
        let pair = cap.map_or("", |m| m.as_str());
        *channel = u8::from_str_radix(pair, 16)
            .map_err(|_| ImageError::InvalidColorFormat(input.to_string()))?;
    }
    Ok(Color(channels))
}

impl FromStr for Color {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_hex_color(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
