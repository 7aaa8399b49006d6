//! Configuration loading and management
//!
//! Handles parsing of `.tagview.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tag-related configuration
    #[serde(default)]
    pub tags: TagsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: TagsConfig::default(),
        }
    }
}

/// Tag-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsConfig {
    /// Message template used when the create-tag message prompt is left
    /// blank. `{tag_name}` is replaced with the entered tag name.
    #[serde(default = "default_message")]
    pub default_message: String,
}

fn default_message() -> String {
    "Tag {tag_name}".to_string()
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            default_message: default_message(),
        }
    }
}

impl TagsConfig {
    /// Expand the default message template for a tag name.
    pub fn message_for(&self, tag_name: &str) -> String {
        self.default_message.replace("{tag_name}", tag_name)
    }
}

impl Config {
    /// Load configuration from a `.tagview.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from repo root, or return defaults
    pub fn load_from_repo(repo_root: &Path) -> Self {
        let config_path = repo_root.join(".tagview.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}
