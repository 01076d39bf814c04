//! `[canvas]` and `[border]` section configuration.
//!
//! ```toml
//! [canvas]
//! width = 1200
//! height = 600
//! background = "#ffffff"
//!
//! [border]
//! size = 20
//! position = "bottom"
//! fill = ["#820c02", "#a91401", "#d51f06", "#de3f24", "#eda895", "#ffffff"]
//! ```
//!
//! `fill` also takes a single color: `fill = "#000000"`.

use serde::{Deserialize, Serialize};

use crate::image::{BorderOptions, Color, Fill, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSectionConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Default for CanvasSectionConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            background: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSectionConfig {
    pub enable: bool,
    /// Thickness in pixels.
    pub size: u32,
    pub position: Position,
    pub fill: Fill,
}

/// The striped red-to-white bar along the bottom edge.
const STRIPES: [[u8; 3]; 6] = [
    [0x82, 0x0C, 0x02],
    [0xA9, 0x14, 0x01],
    [0xD5, 0x1F, 0x06],
    [0xDE, 0x3F, 0x24],
    [0xED, 0xA8, 0x95],
    [0xFF, 0xFF, 0xFF],
];

impl Default for BorderSectionConfig {
    fn default() -> Self {
        Self {
            enable: true,
            size: 20,
            position: Position::Bottom,
            fill: Fill::Stripes(STRIPES.iter().copied().map(Color).collect()),
        }
    }
}

impl BorderSectionConfig {
    pub fn options(&self) -> BorderOptions {
        BorderOptions::new(self.position, self.fill.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_canvas_defaults() {
        let config = test_parse_config("");
        assert_eq!((config.canvas.width, config.canvas.height), (1200, 600));
        assert_eq!(config.canvas.background, Color::WHITE);
    }

    #[test]
    fn test_border_defaults() {
        let config = test_parse_config("");
        assert!(config.border.enable);
        assert_eq!(config.border.size, 20);
        assert_eq!(config.border.position, Position::Bottom);
        let Fill::Stripes(colors) = &config.border.fill else {
            panic!("expected stripes");
        };
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[2], "#D51F06".parse().unwrap());
        assert_eq!(colors[5], Color::WHITE);
    }

    #[test]
    fn test_border_solid_fill() {
        let config = test_parse_config("[border]\nposition = \"left\"\nfill = \"#000000\"\nsize = 4");
        assert_eq!(config.border.options().position, Position::Left);
        assert_eq!(config.border.options().fill, Fill::Solid(Color::BLACK));
        assert_eq!(config.border.size, 4);
    }

    #[test]
    fn test_border_bad_values_fail_to_parse() {
        assert!(toml::from_str::<BorderSectionConfig>("position = \"middle\"").is_err());
        assert!(toml::from_str::<BorderSectionConfig>("fill = \"red\"").is_err());
        assert!(toml::from_str::<CanvasSectionConfig>("background = \"#fff\"").is_err());
    }
}
