//! `og-image init`: write a config with every default spelled out.

use std::fs;

use anyhow::{Context, Result, bail};

use crate::{config::OgConfig, log};

/// Write the default config to `config.config_path`.
///
/// An existing file is only replaced with `force`.
pub fn write_config(config: &OgConfig, force: bool) -> Result<()> {
    let path = &config.config_path;
    if path.exists() && !force {
        bail!("{} already exists, use --force to overwrite", path.display());
    }

    let content = format!(
        "# og-image configuration (v{})\n# Every key is optional; remove what you do not change.\n\n{}",
        env!("CARGO_PKG_VERSION"),
        OgConfig::default_toml()?
    );
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextStyle;
    use tempfile::TempDir;

    fn config_at(dir: &TempDir) -> OgConfig {
        OgConfig {
            config_path: dir.path().join("og.toml"),
            ..OgConfig::default()
        }
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let config = config_at(&dir);
        write_config(&config, false).unwrap();

        let loaded = OgConfig::from_path(&config.config_path).unwrap();
        assert_eq!(loaded.title, TextStyle::title());
        assert_eq!(loaded.canvas.width, 1200);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let config = config_at(&dir);
        fs::write(&config.config_path, "# mine").unwrap();

        let err = write_config(&config, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&config.config_path).unwrap(), "# mine");

        write_config(&config, true).unwrap();
        assert!(fs::read_to_string(&config.config_path).unwrap().contains("[canvas]"));
    }
}
