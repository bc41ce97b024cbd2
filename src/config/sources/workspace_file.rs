//! Workspace config file source: config/config.toml and config/{env}.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Environment selecting the per-environment workspace file.
pub fn environment_name() -> String {
    std::env::var("COLAB_ENV")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "development".to_string())
}

/// Add workspace config files to builder.
/// Precedence: config/config.toml (base) then config/{COLAB_ENV}.toml.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_dir = workspace_root.join("config");

    let base = config_dir.join("config.toml");
    if base.exists() {
        builder = builder.add_source(File::from(base).format(FileFormat::Toml).required(false));
    }

    let per_env = config_dir.join(format!("{}.toml", environment_name()));
    if per_env.exists() {
        builder = builder.add_source(File::from(per_env).format(FileFormat::Toml).required(false));
    }

    Ok(builder)
}
