//! Error types for the collaborative process client.

use thiserror::Error;

/// Required fields that were left empty on a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity}: missing required field(s): {}", .fields.join(", "))]
pub struct ValidationError {
    pub entity: &'static str,
    pub fields: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            fields: Vec::new(),
        }
    }

    /// Record `field` as missing when `value` is blank.
    pub fn require(mut self, field: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fields.push(field);
        }
        self
    }

    /// Record `field` as missing when `value` is `None`.
    pub fn require_some<T>(mut self, field: &'static str, value: Option<T>) -> Self {
        if value.is_none() {
            self.fields.push(field);
        }
        self
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Document export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: {0}")]
    EmptySurface(String),

    #[error("Raster too large: {width}x{height} pixels")]
    RasterTooLarge { width: u64, height: u64 },

    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("Oversampling factor must be 2 or 3 (got {0})")]
    InvalidScale(u32),

    #[error("Export worker failed: {0}")]
    Worker(String),

    #[error("Failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by API, export and configuration operations
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Could not reach the process API: {0}")]
    Transport(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            ApiError::Status {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else if error.is_timeout() {
            ApiError::Transport(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            ApiError::Transport(format!("Connection error: {}", error))
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}
