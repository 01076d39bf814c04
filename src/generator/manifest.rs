//! JSON manifest of generated images.
//!
//! ```json
//! {
//!   "hello-world": {
//!     "path": "assets/og-images/posts/hello-world.png",
//!     "width": 1200,
//!     "height": 600,
//!     "alt": "Hello World"
//!   }
//! }
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Image data a post page needs for its `og:image` tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the site root, `/`-separated.
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Slug → entry, sorted by slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Read an existing manifest; a missing file is an empty manifest.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid manifest {}", path.display()))
    }

    pub fn insert(&mut self, slug: impl Into<String>, entry: ManifestEntry) {
        self.entries.insert(slug.into(), entry);
    }

    pub fn get(&self, slug: &str) -> Option<&ManifestEntry> {
        self.entries.get(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n").with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(slug: &str) -> ManifestEntry {
        ManifestEntry {
            path: format!("assets/og-images/posts/{slug}.png"),
            width: 1200,
            height: 600,
            alt: slug.to_uppercase(),
        }
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let manifest = Manifest::load(Path::new("/definitely/missing/og.json")).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_save_and_merge() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("og.json");

        let mut manifest = Manifest::default();
        manifest.insert("b", entry("b"));
        manifest.insert("a", entry("a"));
        manifest.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.find("\"a\"").unwrap() < text.find("\"b\"").unwrap());
        assert!(text.contains("\"width\": 1200"));

        let mut loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);

        // Regenerating one post replaces only its entry.
        let mut changed = entry("a");
        changed.alt = "New".to_string();
        loaded.insert("a", changed);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("a").unwrap().alt, "New");
        assert_eq!(loaded.get("b"), Some(&entry("b")));
    }

    #[test]
    fn test_invalid_manifest_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("og.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(Manifest::load(&path).is_err());
    }
}
