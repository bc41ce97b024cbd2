//! View State
//!
//! Per-screen state values. A command fetches or mutates, then feeds the
//! outcome through `apply`; rendering reads the state only. Failures never
//! clobber data that was already shown, and every outcome records exactly one
//! notification. The error itself is handed back so the caller can still
//! choose an exit status.

use crate::error::ApiError;
use crate::model::Entity;
use serde::Serialize;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Validation problems are warnings; everything else is an error.
    pub fn from_error(error: &ApiError) -> Self {
        match error {
            ApiError::Validation(_) => Self::warning(error.to_string()),
            _ => Self::error(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// State of a single-record screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub notification: Option<Notification>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            notification: None,
        }
    }
}

impl<T> ViewState<T> {
    /// Replace data on success; keep prior data on failure.
    pub fn apply(
        &mut self,
        outcome: Result<T, ApiError>,
        success: Option<Notification>,
    ) -> Result<&T, ApiError> {
        match outcome {
            Ok(data) => {
                self.notification = success;
                Ok(&*self.data.insert(data))
            }
            Err(error) => {
                self.notification = Some(Notification::from_error(&error));
                Err(error)
            }
        }
    }

    /// Record the outcome of a mutation. A successful outcome carries its own
    /// confirmation; data already shown is left alone.
    pub fn apply_mutation(
        &mut self,
        outcome: Result<Notification, ApiError>,
    ) -> Result<&Notification, ApiError> {
        match outcome {
            Ok(confirmation) => Ok(&*self.notification.insert(confirmation)),
            Err(error) => {
                self.notification = Some(Notification::from_error(&error));
                Err(error)
            }
        }
    }
}

/// State of a list screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub query: Option<String>,
    pub notification: Option<Notification>,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: None,
            notification: None,
        }
    }
}

impl<T: Entity> ListView<T> {
    pub fn with_query(query: Option<String>) -> Self {
        Self {
            query: query.filter(|q| !q.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Replace items with the search-filtered fetch result on success.
    pub fn apply(&mut self, outcome: Result<Vec<T>, ApiError>) -> Result<(), ApiError> {
        match outcome {
            Ok(items) => {
                self.items = crate::search::filter(items, self.query.as_deref());
                self.notification = if self.items.is_empty() {
                    Some(Notification::info(match &self.query {
                        Some(q) => format!("No {} matches \"{}\"", T::KIND, q),
                        None => format!("No {} records", T::KIND),
                    }))
                } else {
                    None
                };
                Ok(())
            }
            Err(error) => {
                self.notification = Some(Notification::from_error(&error));
                Err(error)
            }
        }
    }
}
