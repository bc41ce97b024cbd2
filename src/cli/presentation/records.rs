//! Record presentation: list tables and detail views for every entity.

use super::shared::{detail_table, section_heading, to_json};
use crate::error::ApiError;
use crate::model::{Activity, Entity, Pattern, Practice, Process, Role, Round, Thinklet};
use crate::state::ListView;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

/// Table layout of a record.
pub trait Tabular: Entity {
    /// Heading for list output, e.g. "Roles".
    const TITLE: &'static str;

    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
    fn details(&self) -> Vec<(&'static str, String)>;
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn id_or_dash(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl Tabular for Process {
    const TITLE: &'static str = "Processes";

    fn headers() -> Vec<&'static str> {
        vec!["Id", "Name", "Version", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            or_dash(self.version.as_deref()),
            self.description.clone(),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Description", or_dash(Some(&self.description))),
            ("Version", or_dash(self.version.as_deref())),
            ("Image", or_dash(self.image.as_deref())),
        ]
    }
}

impl Tabular for Round {
    const TITLE: &'static str = "Rounds";

    fn headers() -> Vec<&'static str> {
        vec!["Id", "Name", "Status", "Process"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.status.label().to_string(),
            self.process_name
                .clone()
                .unwrap_or_else(|| id_or_dash(self.process_id)),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Description", or_dash(Some(&self.description))),
            ("Status", format!("{} ({})", self.status.label(), self.status.wire_name())),
            ("Iterative", yes_no(self.iterative)),
            ("Process", id_or_dash(self.process_id)),
        ]
    }
}

impl Tabular for Activity {
    const TITLE: &'static str = "Activities";

    fn headers() -> Vec<&'static str> {
        vec!["Id", "Name", "Round", "Practice", "Thinklet"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.parent_round_name
                .clone()
                .unwrap_or_else(|| id_or_dash(self.parent_round_id)),
            or_dash(self.practice_label()),
            or_dash(self.thinklet_label()),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let roles = self.role_names();
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Description", or_dash(Some(&self.description))),
            ("Iterative", yes_no(self.iterative)),
            ("Process", id_or_dash(self.process_id)),
            ("Round", id_or_dash(self.parent_round_id)),
            ("Practice", or_dash(self.practice_label())),
            ("Thinklet", or_dash(self.thinklet_label())),
            ("Pattern", or_dash(self.pattern_label())),
            (
                "Roles",
                if roles.is_empty() {
                    "-".to_string()
                } else {
                    roles.join(", ")
                },
            ),
        ]
    }
}

impl Tabular for Practice {
    const TITLE: &'static str = "Practices";

    fn headers() -> Vec<&'static str> {
        vec!["Id", "Name", "Type", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.practice_type.clone(),
            self.description.clone(),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Type", or_dash(Some(&self.practice_type))),
            ("Description", or_dash(Some(&self.description))),
        ]
    }
}

impl Tabular for Thinklet {
    const TITLE: &'static str = "Thinklets";

    fn headers() -> Vec<&'static str> {
        vec!["Id", "Name", "Pattern", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.pattern
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| id_or_dash(self.pattern_id)),
            self.description.clone(),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Description", or_dash(Some(&self.description))),
            ("Pattern", id_or_dash(self.resolved_pattern_id())),
        ]
    }
}

impl Tabular for Pattern {
    const TITLE: &'static str = "Patterns";

    fn headers() -> Vec<&'static str> {
        vec!["Id", "Name", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.description.clone()]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Description", or_dash(Some(&self.description))),
        ]
    }
}

impl Tabular for Role {
    const TITLE: &'static str = "Roles";

    fn headers() -> Vec<&'static str> {
        vec!["Id", "Name", "Skills", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.skills.clone(),
            self.description.clone(),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Skills", or_dash(Some(&self.skills))),
            ("Description", or_dash(Some(&self.description))),
        ]
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

/// Records as a table; empty string for no records.
pub fn record_table<T: Tabular>(items: &[T]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(T::headers());
    for item in items {
        table.add_row(item.row());
    }
    table.to_string()
}

pub fn format_list_text<T: Tabular>(view: &ListView<T>, color: bool) -> String {
    let mut out = format!("{}\n\n", section_heading(T::TITLE, color));
    if !view.items.is_empty() {
        out.push_str(&record_table(&view.items));
        out.push_str(&format!("\n\nTotal: {} {}", view.items.len(), T::KIND));
        if let Some(query) = &view.query {
            out.push_str(&format!(" matching \"{}\"", query));
        }
    }
    out
}

pub fn format_list_json<T: Tabular + Serialize>(view: &ListView<T>) -> Result<String, ApiError> {
    to_json(&serde_json::json!({
        "items": view.items,
        "total": view.items.len(),
        "query": view.query,
    }))
}

pub fn format_record_text<T: Tabular>(record: &T, color: bool) -> String {
    let title = format!("{} {}", capitalize(T::KIND), record.id());
    format!(
        "{}\n\n{}",
        section_heading(&title, color),
        detail_table(&record.details())
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
