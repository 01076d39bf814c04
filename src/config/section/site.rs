//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! url = "https://blog.example.com"   # label falls back to the host
//! label = "example.com"              # text in the bottom-right corner
//! ```

use serde::{Deserialize, Serialize};

use crate::config::util::url_host;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public site URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Site label drawn on every image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SiteSectionConfig {
    /// Configured label, else the host of `url`.
    pub fn label(&self) -> Option<String> {
        self.label
            .clone()
            .filter(|label| !label.trim().is_empty())
            .or_else(|| self.url.as_deref().and_then(url_host))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_label_from_config() {
        let config = test_parse_config("[site]\nurl = \"https://a.example\"\nlabel = \"My Blog\"");
        assert_eq!(config.site.label().as_deref(), Some("My Blog"));
    }

    #[test]
    fn test_label_from_url_host() {
        let config = test_parse_config("[site]\nurl = \"https://blog.example.com/\"");
        assert_eq!(config.site.label().as_deref(), Some("blog.example.com"));

        let config = test_parse_config("[site]\nurl = \"https://blog.example.com/\"\nlabel = \"  \"");
        assert_eq!(config.site.label().as_deref(), Some("blog.example.com"));
    }

    #[test]
    fn test_no_label() {
        assert_eq!(test_parse_config("").site.label(), None);
    }
}
