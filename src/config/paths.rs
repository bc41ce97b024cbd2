//! User-level configuration locations.

use crate::error::ApiError;
use directories::BaseDirs;
use std::path::PathBuf;

/// `$XDG_CONFIG_HOME` (or the platform equivalent).
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            ApiError::ConfigError("Could not determine the user configuration directory".to_string())
        })
}

/// Path to the global config file: `<config home>/colab/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    config_home()
        .ok()
        .map(|home| home.join("colab").join("config.toml"))
}
