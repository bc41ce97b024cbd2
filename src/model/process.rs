use super::{null_as_default, Activity, Entity, Round};
use serde::{Deserialize, Serialize};

/// Top-level collaborative workflow container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "id_process")]
    pub id: i64,

    #[serde(rename = "name_process")]
    pub name: String,

    #[serde(rename = "description_process", default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "version_process", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// File name served under `/processImages/`, or an absolute URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Process {
    /// Resolve the image reference against the API base URL.
    pub fn image_url(&self, base_url: &str) -> Option<String> {
        let image = self.image.as_deref()?.trim();
        if image.is_empty() {
            return None;
        }
        if image.starts_with("http") {
            return Some(image.to_string());
        }
        Some(format!(
            "{}/processImages/{}",
            base_url.trim_end_matches('/'),
            image
        ))
    }
}

impl Entity for Process {
    const KIND: &'static str = "process";

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

/// Process payload with its rounds and activities as flat lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullProcess {
    #[serde(flatten)]
    pub process: Process,

    #[serde(default, deserialize_with = "null_as_default")]
    pub rounds: Vec<Round>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<Activity>,
}
