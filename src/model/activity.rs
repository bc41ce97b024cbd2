use super::{null_as_default, Entity, Practice, Role, Thinklet};
use serde::{Deserialize, Serialize};

/// A unit of work, optionally nested under a round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "id_activity")]
    pub id: i64,

    #[serde(rename = "name_activity")]
    pub name: String,

    #[serde(rename = "description_activity", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub iterative: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_round_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_round_name: Option<String>,

    #[serde(rename = "id_process", default, skip_serializing_if = "Option::is_none")]
    pub process_id: Option<i64>,

    #[serde(rename = "name_process", default, skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,

    #[serde(rename = "id_practice", default, skip_serializing_if = "Option::is_none")]
    pub practice_id: Option<i64>,

    #[serde(rename = "name_practice", default, skip_serializing_if = "Option::is_none")]
    pub practice_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice: Option<Practice>,

    #[serde(rename = "id_thinklet", default, skip_serializing_if = "Option::is_none")]
    pub thinklet_id: Option<i64>,

    #[serde(rename = "name_thinklet", default, skip_serializing_if = "Option::is_none")]
    pub thinklet_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinklet: Option<Thinklet>,

    #[serde(
        rename = "assignedRoles",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub assigned_roles: Vec<Role>,
}

impl Activity {
    /// Practice name from the embedded record or the flattened field.
    pub fn practice_label(&self) -> Option<&str> {
        self.practice
            .as_ref()
            .map(|p| p.name.as_str())
            .or(self.practice_name.as_deref())
    }

    /// Thinklet name from the embedded record or the flattened field.
    pub fn thinklet_label(&self) -> Option<&str> {
        self.thinklet
            .as_ref()
            .map(|t| t.name.as_str())
            .or(self.thinklet_name.as_deref())
    }

    pub fn pattern_label(&self) -> Option<&str> {
        self.thinklet
            .as_ref()
            .and_then(|t| t.pattern.as_ref())
            .map(|p| p.name.as_str())
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.assigned_roles.iter().map(|r| r.name.as_str()).collect()
    }
}

impl Entity for Activity {
    const KIND: &'static str = "activity";

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
