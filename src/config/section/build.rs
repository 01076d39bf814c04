//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! skip_envs = ["production"]   # environments where generation is skipped
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Environments in which no images are generated.
    pub skip_envs: Vec<String>,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            skip_envs: vec!["production".to_string()],
        }
    }
}

impl BuildSectionConfig {
    pub fn skips(&self, env: &str) -> bool {
        self.skip_envs.iter().any(|skip| skip.eq_ignore_ascii_case(env))
    }
}
