use super::{default_true, null_as_default, Activity, Entity};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Stage a round is currently in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoundStatus {
    #[default]
    Plan,
    Apply,
    Review,
    Analyze,
}

impl RoundStatus {
    pub const ALL: [RoundStatus; 4] = [
        RoundStatus::Plan,
        RoundStatus::Apply,
        RoundStatus::Review,
        RoundStatus::Analyze,
    ];

    /// Value exchanged with the API.
    pub fn wire_name(self) -> &'static str {
        match self {
            RoundStatus::Plan => "PLANEAR_ESTRATEGIA",
            RoundStatus::Apply => "APLICAR_ESTRATEGIA",
            RoundStatus::Review => "REVISAR_ESTRATEGIA",
            RoundStatus::Analyze => "ANALIZAR_ESTRATEGIA",
        }
    }

    /// Human-readable stage name.
    pub fn label(self) -> &'static str {
        match self {
            RoundStatus::Plan => "Plan strategy",
            RoundStatus::Apply => "Apply strategy",
            RoundStatus::Review => "Review strategy",
            RoundStatus::Analyze => "Analyze strategy",
        }
    }

    fn alias(self) -> &'static str {
        match self {
            RoundStatus::Plan => "plan",
            RoundStatus::Apply => "apply",
            RoundStatus::Review => "review",
            RoundStatus::Analyze => "analyze",
        }
    }

    /// True when `name` designates this stage (trimmed, case-insensitive).
    pub fn matches_name(self, name: &str) -> bool {
        name.trim().eq_ignore_ascii_case(self.wire_name())
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoundStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        RoundStatus::ALL
            .into_iter()
            .find(|status| {
                status.matches_name(needle) || needle.eq_ignore_ascii_case(status.alias())
            })
            .ok_or_else(|| {
                format!(
                    "Invalid round status: {} (must be one of plan, apply, review, analyze)",
                    s
                )
            })
    }
}

impl Serialize for RoundStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

/// Server values outside the known set read as the default, so one bad row
/// does not fail a whole listing. Command-line input goes through `FromStr`
/// and stays strict.
impl<'de> Deserialize<'de> for RoundStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw {
            None => RoundStatus::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(status = %raw, "Unknown round status from server, reading as plan");
                RoundStatus::default()
            }),
        })
    }
}

/// A staged phase of a process. Shares the activity identifier space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    #[serde(rename = "id_activity")]
    pub id: i64,

    #[serde(rename = "name_activity")]
    pub name: String,

    #[serde(rename = "description_activity", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "round_status", default)]
    pub status: RoundStatus,

    #[serde(default = "default_true")]
    pub iterative: bool,

    #[serde(rename = "id_process", default, skip_serializing_if = "Option::is_none")]
    pub process_id: Option<i64>,

    #[serde(rename = "name_process", default, skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,

    #[serde(
        rename = "subActivities",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_activities: Vec<Activity>,
}

impl Round {
    /// The sub-activity named after the round's current stage, if any.
    pub fn active_sub_activity(&self) -> Option<&Activity> {
        self.sub_activities
            .iter()
            .find(|sub| self.status.matches_name(&sub.name))
    }

    pub fn is_active_stage(&self, sub: &Activity) -> bool {
        self.status.matches_name(&sub.name)
    }
}

impl Entity for Round {
    const KIND: &'static str = "round";

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
