//! Configuration System
//!
//! Layered configuration for the API endpoint, document export, and logging.
//! Sources are merged by the `config` crate in precedence order: built-in
//! defaults, the global user file, workspace files, then `COLAB_*`
//! environment variables. CLI flags are applied on top by the binary.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::{config_home, global_config_path};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColabConfig {
    /// Remote process API
    #[serde(default)]
    pub api: ApiConfig,

    /// PDF export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

pub(crate) fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Document export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Oversampling factor applied when rasterizing (2 or 3)
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Page margin in millimetres
    #[serde(default = "default_margin_mm")]
    pub margin_mm: f64,

    /// Directory receiving exported documents
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_scale() -> u32 {
    3
}

fn default_margin_mm() -> f64 {
    10.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            margin_mm: default_margin_mm(),
            output_dir: default_output_dir(),
        }
    }
}

/// One configuration problem, tagged with its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    Api(String),
    Export(String),
    Logging(String),
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigIssue::Api(msg) => write!(f, "api: {}", msg),
            ConfigIssue::Export(msg) => write!(f, "export: {}", msg),
            ConfigIssue::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err("base_url cannot be empty".to_string());
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!("base_url must start with http:// or https:// (got {})", url));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=3).contains(&self.scale) {
            return Err(format!("scale must be 2 or 3 (got {})", self.scale));
        }
        let geometry = crate::export::PageGeometry::a4_portrait(self.margin_mm);
        geometry.validate().map_err(|e| e.to_string())
    }
}

impl ColabConfig {
    /// Validate every section, collecting all problems.
    pub fn validate(&self) -> Result<(), Vec<ConfigIssue>> {
        let mut issues = Vec::new();

        if let Err(e) = self.api.validate() {
            issues.push(ConfigIssue::Api(e));
        }
        if let Err(e) = self.export.validate() {
            issues.push(ConfigIssue::Export(e));
        }
        if let Err(e) = self.logging.validate() {
            issues.push(ConfigIssue::Logging(e));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}
