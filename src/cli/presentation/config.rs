//! Config command presentation.

use crate::config::{ColabConfig, ConfigIssue};
use crate::error::ApiError;

pub fn format_config_toml(config: &ColabConfig) -> Result<String, ApiError> {
    toml::to_string_pretty(config)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render configuration: {}", e)))
}

pub fn format_config_validation(result: &Result<(), Vec<ConfigIssue>>) -> String {
    match result {
        Ok(()) => "Configuration is valid".to_string(),
        Err(issues) => {
            let mut out = format!("Configuration has {} problem(s):", issues.len());
            for issue in issues {
                out.push_str(&format!("\n  - {}", issue));
            }
            out
        }
    }
}
