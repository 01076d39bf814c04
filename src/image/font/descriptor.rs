//! Font descriptor strings.
//!
//! Accepted forms:
//!
//! ```text
//! Helvetica, Bold          family, style words
//! Helvetica, Bold Italic 14
//! Inter Bold 14            Pango-like: trailing style words and size
//! sans-serif               generic family
//! ```

use std::{fmt, str::FromStr};

use fontdb::{Style, Weight};

use crate::image::ImageError;

/// Point size used when a descriptor carries none.
pub const DEFAULT_POINT_SIZE: f32 = 12.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyName {
    Named(String),
    SansSerif,
    Serif,
    Monospace,
}

impl FamilyName {
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "" | "sans" | "sans-serif" => Self::SansSerif,
            "serif" => Self::Serif,
            "mono" | "monospace" => Self::Monospace,
            _ => Self::Named(name.to_string()),
        }
    }

    pub fn as_family(&self) -> fontdb::Family<'_> {
        match self {
            Self::Named(name) => fontdb::Family::Name(name),
            Self::SansSerif => fontdb::Family::SansSerif,
            Self::Serif => fontdb::Family::Serif,
            Self::Monospace => fontdb::Family::Monospace,
        }
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::SansSerif => f.write_str("sans-serif"),
            Self::Serif => f.write_str("serif"),
            Self::Monospace => f.write_str("monospace"),
        }
    }
}

/// A parsed font request: family, weight, slant and optional point size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: FamilyName,
    pub weight: Weight,
    pub style: Style,
    pub size: Option<f32>,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: FamilyName::SansSerif,
            weight: Weight::NORMAL,
            style: Style::Normal,
            size: None,
        }
    }
}

impl FontDescriptor {
    pub fn point_size(&self) -> f32 {
        self.size.unwrap_or(DEFAULT_POINT_SIZE)
    }

    /// Pixel height of the font at `dpi`.
    pub fn pixel_size(&self, dpi: f32) -> f32 {
        self.point_size() * dpi / 72.0
    }

    /// Apply one style/size token. Returns false if the token is neither.
    fn apply_token(&mut self, token: &str) -> bool {
        if let Ok(size) = token.parse::<f32>() {
            if size.is_finite() && size > 0.0 {
                self.size = Some(size);
                return true;
            }
            return false;
        }

        match token.to_ascii_lowercase().as_str() {
            "thin" | "hairline" => self.weight = Weight::THIN,
            "extralight" | "ultralight" => self.weight = Weight::EXTRA_LIGHT,
            "light" => self.weight = Weight::LIGHT,
            "regular" | "normal" | "book" | "roman" => self.weight = Weight::NORMAL,
            "medium" => self.weight = Weight::MEDIUM,
            "semibold" | "demibold" => self.weight = Weight::SEMIBOLD,
            "bold" => self.weight = Weight::BOLD,
            "extrabold" | "ultrabold" => self.weight = Weight::EXTRA_BOLD,
            "black" | "heavy" => self.weight = Weight::BLACK,
            "italic" => self.style = Style::Italic,
            "oblique" => self.style = Style::Oblique,
            _ => return false,
        }
        true
    }
}

impl FromStr for FontDescriptor {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = s.trim();
        let mut descriptor = Self::default();

        if let Some((family, rest)) = source.split_once(',') {
            descriptor.family = FamilyName::parse(family.trim());
            for token in rest.split_whitespace() {
                if !descriptor.apply_token(token) {
                    return Err(ImageError::font(
                        source,
                        format!("unknown style `{token}`"),
                    ));
                }
            }
            return Ok(descriptor);
        }

        // No comma: peel style words and size off the end, the rest is the family.
        let mut tokens: Vec<&str> = source.split_whitespace().collect();
        while tokens.len() > 1 {
            let Some(last) = tokens.last() else { break };
            let mut probe = descriptor.clone();
            if !probe.apply_token(last) {
                break;
            }
            descriptor = probe;
            tokens.pop();
        }
        descriptor.family = FamilyName::parse(&tokens.join(" "));
        Ok(descriptor)
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, weight {}", self.family, self.weight.0)?;
        match self.style {
            Style::Italic => f.write_str(" italic")?,
            Style::Oblique => f.write_str(" oblique")?,
            Style::Normal => {}
        }
        if let Some(size) = self.size {
            write!(f, " {size}pt")?;
        }
        Ok(())
    }
}
