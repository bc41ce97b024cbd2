//! Drafts: the editable form of each entity, validated before any request.

use super::{Activity, Pattern, Practice, Process, Role, Round, RoundStatus, Thinklet};
use crate::api::body::{FormPart, RequestBody};
use crate::error::{ApiError, ValidationError};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// An entity form that can be checked locally and encoded for the API.
pub trait Draft {
    /// Check required fields. Runs before any network call.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Encode the draft as a request body.
    fn to_body(&self) -> Result<RequestBody, ApiError>;
}

/// Where a process image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file uploaded as a binary part.
    File(PathBuf),
    /// Existing file name or URL passed through as text.
    Url(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessDraft {
    pub name: String,
    pub description: String,
    pub version: String,
    pub image: Option<ImageSource>,
}

impl From<&Process> for ProcessDraft {
    fn from(process: &Process) -> Self {
        Self {
            name: process.name.clone(),
            description: process.description.clone(),
            version: process.version.clone().unwrap_or_default(),
            image: process
                .image
                .as_ref()
                .filter(|image| !image.trim().is_empty())
                .map(|image| ImageSource::Url(image.clone())),
        }
    }
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

impl Draft for ProcessDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::new("process")
            .require("name_process", &self.name)
            .into_result()
    }

    fn to_body(&self) -> Result<RequestBody, ApiError> {
        let mut parts = vec![
            FormPart::text("name_process", &self.name),
            FormPart::text("description_process", &self.description),
            FormPart::text("version_process", &self.version),
        ];
        match &self.image {
            Some(ImageSource::File(path)) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    ApiError::InvalidInput(format!(
                        "Failed to read image {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());
                parts.push(FormPart::File {
                    name: "image".to_string(),
                    file_name,
                    mime: image_mime(path).to_string(),
                    bytes,
                });
            }
            Some(ImageSource::Url(url)) if !url.trim().is_empty() => {
                parts.push(FormPart::text("imageUrl", url.trim()));
            }
            _ => {}
        }
        Ok(RequestBody::Form(parts))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundDraft {
    pub name: String,
    pub description: String,
    pub process_id: Option<i64>,
    pub status: RoundStatus,
}

impl From<&Round> for RoundDraft {
    fn from(round: &Round) -> Self {
        Self {
            name: round.name.clone(),
            description: round.description.clone(),
            process_id: round.process_id,
            status: round.status,
        }
    }
}

impl Draft for RoundDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::new("round")
            .require("name_activity", &self.name)
            .require_some("id_process", self.process_id)
            .into_result()
    }

    fn to_body(&self) -> Result<RequestBody, ApiError> {
        // Rounds are always iterative and never carry a practice or thinklet.
        Ok(RequestBody::Json(json!({
            "name_activity": self.name,
            "description_activity": self.description,
            "iterative": true,
            "id_process": self.process_id,
            "id_practice": null,
            "id_thinklet": null,
            "round_status": self.status,
        })))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityDraft {
    #[serde(rename = "name_activity")]
    pub name: String,
    #[serde(rename = "description_activity")]
    pub description: String,
    pub iterative: bool,
    #[serde(rename = "id_process")]
    pub process_id: Option<i64>,
    #[serde(rename = "id_practice")]
    pub practice_id: Option<i64>,
    #[serde(rename = "id_thinklet")]
    pub thinklet_id: Option<i64>,
    pub parent_round_id: Option<i64>,
}

impl From<&Activity> for ActivityDraft {
    fn from(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone(),
            description: activity.description.clone(),
            iterative: activity.iterative,
            process_id: activity.process_id,
            practice_id: activity
                .practice_id
                .or(activity.practice.as_ref().map(|p| p.id)),
            thinklet_id: activity
                .thinklet_id
                .or(activity.thinklet.as_ref().map(|t| t.id)),
            parent_round_id: activity.parent_round_id,
        }
    }
}

impl Draft for ActivityDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::new("activity")
            .require("name_activity", &self.name)
            .require_some("id_process", self.process_id)
            .into_result()
    }

    fn to_body(&self) -> Result<RequestBody, ApiError> {
        RequestBody::json(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PracticeDraft {
    #[serde(rename = "name_practice")]
    pub name: String,
    #[serde(rename = "description_practice")]
    pub description: String,
    #[serde(rename = "type_practice")]
    pub practice_type: String,
}

impl From<&Practice> for PracticeDraft {
    fn from(practice: &Practice) -> Self {
        Self {
            name: practice.name.clone(),
            description: practice.description.clone(),
            practice_type: practice.practice_type.clone(),
        }
    }
}

impl Draft for PracticeDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::new("practice")
            .require("name_practice", &self.name)
            .require("type_practice", &self.practice_type)
            .into_result()
    }

    fn to_body(&self) -> Result<RequestBody, ApiError> {
        RequestBody::json(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThinkletDraft {
    #[serde(rename = "name_thinklet")]
    pub name: String,
    #[serde(rename = "description_thinklet")]
    pub description: String,
    #[serde(rename = "id_pattern")]
    pub pattern_id: Option<i64>,
}

impl From<&Thinklet> for ThinkletDraft {
    fn from(thinklet: &Thinklet) -> Self {
        Self {
            name: thinklet.name.clone(),
            description: thinklet.description.clone(),
            pattern_id: thinklet.resolved_pattern_id(),
        }
    }
}

impl Draft for ThinkletDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::new("thinklet")
            .require("name_thinklet", &self.name)
            .require_some("id_pattern", self.pattern_id)
            .into_result()
    }

    fn to_body(&self) -> Result<RequestBody, ApiError> {
        RequestBody::json(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternDraft {
    #[serde(rename = "name_pattern")]
    pub name: String,
    #[serde(rename = "description_pattern")]
    pub description: String,
}

impl From<&Pattern> for PatternDraft {
    fn from(pattern: &Pattern) -> Self {
        Self {
            name: pattern.name.clone(),
            description: pattern.description.clone(),
        }
    }
}

impl Draft for PatternDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::new("pattern")
            .require("name_pattern", &self.name)
            .into_result()
    }

    fn to_body(&self) -> Result<RequestBody, ApiError> {
        RequestBody::json(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleDraft {
    #[serde(rename = "name_role")]
    pub name: String,
    #[serde(rename = "description_role")]
    pub description: String,
    #[serde(rename = "skills_role")]
    pub skills: String,
}

impl From<&Role> for RoleDraft {
    fn from(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone(),
            skills: role.skills.clone(),
        }
    }
}

impl Draft for RoleDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::new("role")
            .require("name_role", &self.name)
            .require("skills_role", &self.skills)
            .into_result()
    }

    fn to_body(&self) -> Result<RequestBody, ApiError> {
        RequestBody::json(self)
    }
}
