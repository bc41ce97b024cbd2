//! CLI presentation: text and json formatters per command family.

mod config;
mod process;
mod records;
mod shared;

pub use config::{format_config_toml, format_config_validation};
pub use process::{
    format_assigned_roles_json, format_assigned_roles_text, format_export_summary,
    format_process_view_json, format_process_view_text, format_round_detail_json,
    format_round_detail_text, orphan_notifications,
};
pub use records::{format_list_json, format_list_text, format_record_text, Tabular};
pub use shared::to_json;
