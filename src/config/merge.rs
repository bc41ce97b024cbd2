//! Merge rules: defaults applied beneath every other source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.base_url", super::default_base_url())?
        .set_default("api.connect_timeout_secs", 10)?
        .set_default("api.request_timeout_secs", 60)?
        .set_default("export.scale", 3)?
        .set_default("export.margin_mm", 10.0)?
        .set_default("export.output_dir", ".")
}
