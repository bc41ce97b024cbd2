//! CLI output: notifications and error mapping to the stable CLI surface.

use crate::error::ApiError;
use crate::state::{Notification, NotificationLevel};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Whether stdout should receive ANSI colors.
pub fn color_enabled(configured: bool) -> bool {
    configured && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// One notification as a single prefixed line.
pub fn render_notification(notification: &Notification, color: bool) -> String {
    let (symbol, tag) = match notification.level {
        NotificationLevel::Success => ("✓", "success"),
        NotificationLevel::Info => ("i", "info"),
        NotificationLevel::Warning => ("!", "warning"),
        NotificationLevel::Error => ("✗", "error"),
    };
    let prefix = format!("{} {}:", symbol, tag);
    if !color {
        return format!("{} {}", prefix, notification.message);
    }
    let prefix = match notification.level {
        NotificationLevel::Success => prefix.green().bold().to_string(),
        NotificationLevel::Info => prefix.cyan().to_string(),
        NotificationLevel::Warning => prefix.yellow().bold().to_string(),
        NotificationLevel::Error => prefix.red().bold().to_string(),
    };
    format!("{} {}", prefix, notification.message)
}

/// Map a command failure to the single notification printed for it.
pub fn map_error(e: &ApiError) -> String {
    render_notification(&Notification::from_error(e), color_enabled(true))
}

/// Process exit code for a failure.
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::Validation(_) | ApiError::InvalidInput(_) => 2,
        ApiError::ConfigError(_) => 3,
        _ => 1,
    }
}
