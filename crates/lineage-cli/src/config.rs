use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use lineage_core::TREE_FILE_EXTENSION;

/// User-level configuration, read from `<config_dir>/lineage/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Preferred output mode: "pretty", "text" or "json".
    #[serde(default)]
    pub output: Option<String>,
    /// Directory tree files live in when `--file` is not given.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Load the user config, falling back to defaults when the file is absent.
///
/// # Errors
///
/// Returns an error only when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("lineage/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// The tree file a command operates on: the explicit `--file` flag, or the
/// default file name inside the configured data directory (the current
/// directory when none is configured).
#[must_use]
pub fn resolve_tree_path(flag: Option<PathBuf>, config: &UserConfig) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    let dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(default_tree_file_name())
}

fn default_tree_file_name() -> String {
    format!("family.{TREE_FILE_EXTENSION}")
}
