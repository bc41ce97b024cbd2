//! Config loading facade: composes sources in precedence order.

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::ColabConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (highest last): defaults, global file, `config/config.toml`,
    /// `config/{COLAB_ENV}.toml`, `COLAB_*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<ColabConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load from one explicit file, still honouring environment overrides.
    pub fn load_from_file(path: &Path) -> Result<ColabConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let builder = builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }
}
