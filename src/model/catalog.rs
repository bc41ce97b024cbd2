//! Flat descriptive records attachable to activities.

use super::{null_as_default, Entity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Practice {
    #[serde(rename = "id_practice")]
    pub id: i64,

    #[serde(rename = "name_practice")]
    pub name: String,

    #[serde(rename = "description_practice", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "type_practice", default, deserialize_with = "null_as_default")]
    pub practice_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "id_pattern")]
    pub id: i64,

    #[serde(rename = "name_pattern")]
    pub name: String,

    #[serde(rename = "description_pattern", default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thinklet {
    #[serde(rename = "id_thinklet")]
    pub id: i64,

    #[serde(rename = "name_thinklet")]
    pub name: String,

    #[serde(rename = "description_thinklet", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "id_pattern", default, skip_serializing_if = "Option::is_none")]
    pub pattern_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
}

impl Thinklet {
    /// Pattern id from the embedded record or the flat reference.
    pub fn resolved_pattern_id(&self) -> Option<i64> {
        self.pattern.as_ref().map(|p| p.id).or(self.pattern_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "id_role")]
    pub id: i64,

    #[serde(rename = "name_role")]
    pub name: String,

    #[serde(rename = "description_role", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "skills_role", default, deserialize_with = "null_as_default")]
    pub skills: String,
}

macro_rules! impl_entity {
    ($ty:ty, $kind:literal) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

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
    };
}

impl_entity!(Practice, "practice");
impl_entity!(Pattern, "pattern");
impl_entity!(Thinklet, "thinklet");
impl_entity!(Role, "role");
