//! `[posts]` section configuration.
//!
//! ```toml
//! [posts]
//! dir = "_posts"                          # where posts are scanned
//! output = "assets/og-images/posts"       # where images are written
//! format = "png"                          # png, jpeg or webp
//! manifest = "assets/og-images/manifest.json"
//! date_format = "%B %d, %Y"
//! ```

use std::path::PathBuf;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Encoded image format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }

    pub const fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Webp => ImageFormat::WebP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsSectionConfig {
    /// Posts directory (relative to the config file).
    pub dir: PathBuf,

    /// Output directory for images.
    pub output: PathBuf,

    pub format: OutputFormat,

    /// JSON manifest of generated images; none when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Date line format (`%Y %m %d %e %B %b %A %a`).
    pub date_format: String,
}

impl Default for PostsSectionConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("_posts"),
            output: PathBuf::from("assets/og-images/posts"),
            format: OutputFormat::Png,
            manifest: None,
            date_format: "%B %d, %Y".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_posts_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.posts.dir, PathBuf::from("_posts"));
        assert_eq!(config.posts.output, PathBuf::from("assets/og-images/posts"));
        assert_eq!(config.posts.format, OutputFormat::Png);
        assert_eq!(config.posts.manifest, None);
        assert_eq!(config.posts.date_format, "%B %d, %Y");
    }

    #[test]
    fn test_output_format() {
        let config = test_parse_config("[posts]\nformat = \"jpg\"");
        assert_eq!(config.posts.format, OutputFormat::Jpeg);
        assert_eq!(config.posts.format.extension(), "jpg");
        assert_eq!(config.posts.format.image_format(), ImageFormat::Jpeg);

        let config = test_parse_config("[posts]\nformat = \"webp\"");
        assert_eq!(config.posts.format.extension(), "webp");
    }

    #[test]
    fn test_unknown_format_is_error() {
        assert!(toml::from_str::<PostsSectionConfig>("format = \"gif\"").is_err());
    }
}
