//! `[fonts]` section configuration.
//!
//! ```toml
//! [fonts]
//! system = true                 # load installed fonts
//! dirs = ["fonts"]              # extra font files or directories
//! fallback = "sans-serif"       # family used when a requested one is missing
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{image::FontSources, utils::path::resolve_under};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsSectionConfig {
    pub system: bool,
    pub dirs: Vec<PathBuf>,
    /// Set to `""` to fail on any missing family instead.
    pub fallback: String,
}

impl Default for FontsSectionConfig {
    fn default() -> Self {
        Self {
            system: true,
            dirs: Vec::new(),
            fallback: "sans-serif".to_string(),
        }
    }
}

impl FontsSectionConfig {
    /// Resolve font directories against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.dirs = self.dirs.iter().map(|dir| resolve_under(root, dir)).collect();
    }

    pub fn sources(&self) -> FontSources {
        FontSources {
            system: self.system,
            dirs: self.dirs.clone(),
            fallback: Some(self.fallback.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_fonts_defaults() {
        let sources = test_parse_config("").fonts.sources();
        assert!(sources.system);
        assert!(sources.dirs.is_empty());
        assert_eq!(sources.fallback.as_deref(), Some("sans-serif"));
    }

    #[test]
    fn test_empty_fallback_disables_it() {
        let sources = test_parse_config("[fonts]\nfallback = \"\"").fonts.sources();
        assert_eq!(sources.fallback, None);
    }

    #[test]
    fn test_partial_section_keeps_fallback() {
        let config = test_parse_config("[fonts]\ndirs = [\"fonts\"]");
        assert_eq!(config.fonts.fallback, "sans-serif");
    }

    #[test]
    fn test_normalize_dirs() {
        let mut fonts = FontsSectionConfig {
            dirs: vec![PathBuf::from("fonts"), PathBuf::from("/usr/share/fonts")],
            ..FontsSectionConfig::default()
        };
        fonts.normalize(Path::new("/site"));
        assert_eq!(
            fonts.dirs,
            vec![PathBuf::from("/site/fonts"), PathBuf::from("/usr/share/fonts")]
        );
    }
}
