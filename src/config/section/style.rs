//! Text block styles: `[title]`, `[date]`, `[tags]` and `[label]`.
//!
//! ```toml
//! [title]
//! gravity = "nw"                  # nw, ne, sw, se
//! width = 1040                    # wrap width in pixels
//! color = "#2f313d"
//! dpi = 500
//! font = "Helvetica, Bold"
//! offset = { x = 80, y = 100 }    # inset from the anchor corner
//! tagged_offset = { x = 80, y = 150 }
//! ```
//!
//! Every key is optional. Missing keys take the built-in value for that
//! block, so `[title]\ncolor = "#000000"` only changes the color.

use serde::{Deserialize, Serialize};

use crate::image::{Color, Gravity, Offset, TextOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<Gravity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Offset>,
    /// Offset used when the post has tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagged_offset: Option<Offset>,
}

impl TextStyle {
    pub fn title() -> Self {
        Self {
            enable: Some(true),
            gravity: Some(Gravity::Nw),
            width: Some(1040),
            color: Some(Color([0x2f, 0x31, 0x3d])),
            dpi: Some(500),
            font: Some("Helvetica, Bold".to_string()),
            offset: Some(Offset::new(80, 100)),
            tagged_offset: None,
        }
    }

    pub fn date() -> Self {
        Self {
            enable: Some(true),
            gravity: Some(Gravity::Sw),
            width: None,
            color: Some(Color([0x53, 0x53, 0x58])),
            dpi: Some(200),
            font: Some("Helvetica, Regular".to_string()),
            offset: Some(Offset::new(80, 100)),
            tagged_offset: Some(Offset::new(80, 150)),
        }
    }

    pub fn tags() -> Self {
        Self {
            enable: Some(true),
            gravity: Some(Gravity::Sw),
            width: None,
            color: Some(Color([0x53, 0x53, 0x58])),
            dpi: Some(150),
            font: Some("Helvetica, Regular".to_string()),
            offset: Some(Offset::new(80, 100)),
            tagged_offset: None,
        }
    }

    pub fn label() -> Self {
        Self {
            enable: Some(true),
            gravity: Some(Gravity::Se),
            width: None,
            color: Some(Color([0x53, 0x53, 0x58])),
            dpi: Some(200),
            font: Some("Helvetica, Regular".to_string()),
            offset: Some(Offset::new(80, 100)),
            tagged_offset: Some(Offset::new(80, 150)),
        }
    }

    /// Fill every unset key from `base`.
    pub fn or(self, base: Self) -> Self {
        Self {
            enable: self.enable.or(base.enable),
            gravity: self.gravity.or(base.gravity),
            width: self.width.or(base.width),
            color: self.color.or(base.color),
            dpi: self.dpi.or(base.dpi),
            font: self.font.or(base.font),
            offset: self.offset.or(base.offset),
            tagged_offset: self.tagged_offset.or(base.tagged_offset),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enable.unwrap_or(true)
    }

    pub fn options(&self) -> TextOptions {
        TextOptions {
            gravity: self.gravity.unwrap_or_default(),
            width: self.width,
            dpi: self.dpi,
            color: self.color.unwrap_or(Color::BLACK),
            font: self.font.clone(),
        }
    }

    /// Offset for a post with or without tags.
    pub fn offset(&self, tagged: bool) -> Offset {
        let plain = self.offset.unwrap_or_default();
        if tagged {
            self.tagged_offset.unwrap_or(plain)
        } else {
            plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_style_keeps_block_defaults() {
        let style: TextStyle = toml::from_str("color = \"#000000\"").unwrap();
        let style = style.or(TextStyle::title());

        assert_eq!(style.color, Some(Color::BLACK));
        assert_eq!(style.gravity, Some(Gravity::Nw));
        assert_eq!(style.width, Some(1040));
        assert_eq!(style.font.as_deref(), Some("Helvetica, Bold"));
    }

    #[test]
    fn test_offset_with_tags() {
        let date = TextStyle::date();
        assert_eq!(date.offset(false), Offset::new(80, 100));
        assert_eq!(date.offset(true), Offset::new(80, 150));

        // No tagged offset: same either way.
        let tags = TextStyle::tags();
        assert_eq!(tags.offset(true), tags.offset(false));
    }

    #[test]
    fn test_inline_offset_table() {
        let style: TextStyle = toml::from_str("offset = { x = 10 }\ngravity = \"se\"").unwrap();
        assert_eq!(style.offset(false), Offset::new(10, 0));
        assert_eq!(style.options().gravity, Gravity::Se);
    }

    #[test]
    fn test_disable_block() {
        let style: TextStyle = toml::from_str("enable = false").unwrap();
        assert!(!style.or(TextStyle::tags()).enabled());
        assert!(TextStyle::default().enabled());
    }

    #[test]
    fn test_invalid_gravity_is_parse_error() {
        let err = toml::from_str::<TextStyle>("gravity = \"middle\"").unwrap_err();
        assert!(err.to_string().contains("middle"));
    }
}
