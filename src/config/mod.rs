//! Generator configuration from `og.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Site URL and the label drawn on every image      |
//! | `[posts]`   | Posts directory, output directory, format        |
//! | `[canvas]`  | Image size and background                        |
//! | `[border]`  | Edge strip (solid or striped)                    |
//! | `[title]`   | Title text block                                 |
//! | `[date]`    | Date text block                                  |
//! | `[tags]`    | Tags text block                                  |
//! | `[label]`   | Site label text block                            |
//! | `[fonts]`   | Font sources and fallback                        |
//! | `[build]`   | Environments that skip generation                |
//!
//! Every key is optional; an empty file reproduces the built-in template.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{
    BorderSectionConfig, BuildSectionConfig, CanvasSectionConfig, FontsSectionConfig,
    PostsSectionConfig, SiteSectionConfig, TextStyle,
};

use util::find_config_file;

use crate::{
    cli::{Cli, Commands},
    debug,
    image::Fill,
    log,
    utils::path::{normalize_path, resolve_under},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Largest accepted canvas edge, in pixels.
const MAX_CANVAS_EDGE: u32 = 16_384;

/// Environment used when none is given.
pub const DEFAULT_ENV: &str = "development";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing og.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OgConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Active environment (internal use only, from `--env` / `OG_ENV`)
    #[serde(skip)]
    pub env: String,

    pub site: SiteSectionConfig,
    pub posts: PostsSectionConfig,
    pub canvas: CanvasSectionConfig,
    pub border: BorderSectionConfig,
    pub title: TextStyle,
    pub date: TextStyle,
    pub tags: TextStyle,
    pub label: TextStyle,
    pub fonts: FontsSectionConfig,
    pub build: BuildSectionConfig,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            env: DEFAULT_ENV.to_string(),
            site: SiteSectionConfig::default(),
            posts: PostsSectionConfig::default(),
            canvas: CanvasSectionConfig::default(),
            border: BorderSectionConfig::default(),
            title: TextStyle::title(),
            date: TextStyle::date(),
            tags: TextStyle::tags(),
            label: TextStyle::label(),
            fonts: FontsSectionConfig::default(),
            build: BuildSectionConfig::default(),
        }
    }
}

impl OgConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. A missing file is not an
    /// error: the built-in template is used with cwd as the root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            if !cli.is_init() {
                debug!("config"; "{} not found, using defaults", cli.config.display());
            }
            Self::default()
        };

        config.config_path = config_path;
        config.finalize();
        config.apply_command_options(cli);

        if !cli.is_init() {
            config.validate()?;
        }
        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        if cli.is_init() {
            let path = cwd.join(&cli.config);
            let exists = path.exists();
            return Ok((path, exists));
        }

        match find_config_file(&cli.config) {
            Some(path) => Ok((path, true)),
            None => Ok((cwd.join(&cli.config), false)),
        }
    }

    /// Load configuration from file path, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Resolve paths against the config directory and fill text styles.
    pub(crate) fn finalize(&mut self) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let root = normalize_path(&root);
        self.config_path = normalize_path(&self.config_path);

        self.posts.dir = resolve_under(&root, &self.posts.dir);
        self.posts.output = resolve_under(&root, &self.posts.output);
        self.posts.manifest = self.posts.manifest.take().map(|m| resolve_under(&root, &m));
        self.fonts.normalize(&root);
        self.root = root;

        self.fill_styles();
    }

    /// Fill unset text style keys from the built-in template.
    fn fill_styles(&mut self) {
        self.title = std::mem::take(&mut self.title).or(TextStyle::title());
        self.date = std::mem::take(&mut self.date).or(TextStyle::date());
        self.tags = std::mem::take(&mut self.tags).or(TextStyle::tags());
        self.label = std::mem::take(&mut self.label).or(TextStyle::label());
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Commands::Generate { args } = &cli.command {
            self.env = args.env.clone();
        }
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Whether the active environment skips generation.
    pub fn skips_env(&self) -> bool {
        self.build.skips(&self.env)
    }

    /// The default config as TOML, for `og-image init`.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default config")
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check value ranges. Collects every problem into one error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        let canvas = &self.canvas;
        for (name, value) in [("canvas.width", canvas.width), ("canvas.height", canvas.height)] {
            if value == 0 || value > MAX_CANVAS_EDGE {
                problems.push(format!("{name} must be between 1 and {MAX_CANVAS_EDGE}, got {value}"));
            }
        }

        if self.border.enable {
            let span = if self.border.position.is_vertical() {
                canvas.width
            } else {
                canvas.height
            };
            if self.border.size > span {
                problems.push(format!(
                    "border.size {} exceeds the canvas ({span}px)",
                    self.border.size
                ));
            }
            if matches!(&self.border.fill, Fill::Stripes(colors) if colors.is_empty()) {
                problems.push("border.fill needs at least one color".to_string());
            }
        }

        for (name, style) in [
            ("title", &self.title),
            ("date", &self.date),
            ("tags", &self.tags),
            ("label", &self.label),
        ] {
            if style.dpi == Some(0) {
                problems.push(format!("{name}.dpi must be positive"));
            }
            if style.width == Some(0) {
                problems.push(format!("{name}.width must be positive"));
            }
        }

        if let Some(url) = &self.site.url
            && url::Url::parse(url).is_err()
        {
            problems.push(format!("site.url `{url}` is not a valid URL"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems.join("; ")))
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a config snippet and fill text styles.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> OgConfig {
    let (mut parsed, ignored) = OgConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.fill_styles();
    parsed
}

// ============================================================================
// tests
// ============================================================================
