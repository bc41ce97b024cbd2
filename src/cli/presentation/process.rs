//! Process detail, round detail and role assignment presentation.

use super::records::{record_table, Tabular};
use super::shared::{detail_table, section_heading, to_json};
use crate::error::ApiError;
use crate::export::ExportSummary;
use crate::model::{Activity, Role, Round};
use crate::state::Notification;
use crate::views::ProcessView;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;

fn activity_table(activities: &[Activity]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Activity", "Practice", "Thinklet", "Pattern", "Roles"]);
    for activity in activities {
        let roles = activity.role_names();
        table.add_row(vec![
            activity.id.to_string(),
            activity.name.clone(),
            activity.practice_label().unwrap_or("-").to_string(),
            activity.thinklet_label().unwrap_or("-").to_string(),
            activity.pattern_label().unwrap_or("-").to_string(),
            if roles.is_empty() {
                "-".to_string()
            } else {
                roles.join(", ")
            },
        ]);
    }
    table.to_string()
}

/// Warnings for activities that reference a round missing from the process.
pub fn orphan_notifications(view: &ProcessView) -> Vec<Notification> {
    view.orphans
        .iter()
        .map(|orphan| {
            Notification::warning(format!(
                "Activity {} ({}) references round {}, which is not part of this process; it is not shown",
                orphan.activity.id, orphan.activity.name, orphan.missing_round_id
            ))
        })
        .collect()
}

pub fn format_process_view_text(view: &ProcessView, base_url: &str, color: bool) -> String {
    let process = &view.process;
    let mut details = process.details();
    if let Some(url) = process.image_url(base_url) {
        if let Some(image) = details.iter_mut().find(|(field, _)| *field == "Image") {
            image.1 = url;
        }
    }

    let mut out = format!(
        "{}\n\n{}\n",
        section_heading(&format!("Process: {}", process.name), color),
        detail_table(&details)
    );

    for group in &view.groups {
        out.push_str(&format!(
            "\n{}\n",
            section_heading(
                &format!("Round: {} [{}]", group.round.name, group.round.status.label()),
                color
            )
        ));
        if group.activities.is_empty() {
            out.push_str("  No activities\n");
        } else {
            out.push_str(&activity_table(&group.activities));
            out.push('\n');
        }
    }

    out.push_str(&format!(
        "\n{}\n",
        section_heading("Activities without round", color)
    ));
    if view.ungrouped.is_empty() {
        out.push_str("  No activities\n");
    } else {
        out.push_str(&activity_table(&view.ungrouped));
        out.push('\n');
    }
    out.trim_end().to_string()
}

pub fn format_process_view_json(view: &ProcessView) -> Result<String, ApiError> {
    to_json(view)
}

/// Round details plus its stage sub-activities, the current stage marked.
pub fn format_round_detail_text(round: &Round, color: bool) -> String {
    let mut out = format!(
        "{}\n\n{}\n",
        section_heading(&format!("Round {}", round.id), color),
        detail_table(&round.details())
    );
    if !round.sub_activities.is_empty() {
        out.push_str(&format!("\n{}\n", section_heading("Stages", color)));
        for sub in &round.sub_activities {
            let marker = if round.is_active_stage(sub) { "▶" } else { " " };
            out.push_str(&format!("  {} {} (#{})\n", marker, sub.name, sub.id));
        }
    }
    out.trim_end().to_string()
}

pub fn format_round_detail_json(round: &Round) -> Result<String, ApiError> {
    let active = round.active_sub_activity().map(|sub| sub.id);
    let mut value = serde_json::to_value(round)
        .map_err(|e| ApiError::Decode(format!("Failed to encode JSON output: {}", e)))?;
    value["active_sub_activity"] = json!(active);
    value["status_label"] = json!(round.status.label());
    to_json(&value)
}

pub fn format_assigned_roles_text(activity_id: i64, roles: &[Role], color: bool) -> String {
    let heading = section_heading(&format!("Roles assigned to activity {}", activity_id), color);
    if roles.is_empty() {
        return format!("{}\n\n  No roles assigned", heading);
    }
    format!("{}\n\n{}", heading, record_table(roles))
}

pub fn format_assigned_roles_json(activity_id: i64, roles: &[Role]) -> Result<String, ApiError> {
    to_json(&json!({ "activity": activity_id, "assignedRoles": roles }))
}

pub fn format_export_summary(summary: &ExportSummary) -> String {
    format!(
        "Exported {} ({} page{}, {} bytes, {}x)",
        summary.path.display(),
        summary.pages,
        if summary.pages == 1 { "" } else { "s" },
        summary.bytes,
        summary.scale
    )
}
