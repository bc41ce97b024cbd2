//! Request bodies independent of the HTTP client.

use crate::error::ApiError;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

/// Encoded body of a create or update request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<FormPart>),
}

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: &str, value: &str) -> Self {
        FormPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::InvalidInput(format!("Failed to encode request: {}", e)))
    }

    /// Attach the body to a request builder.
    pub(crate) fn apply(
        self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        match self {
            RequestBody::Json(value) => Ok(request.json(&value)),
            RequestBody::Form(parts) => Ok(request.multipart(into_multipart(parts)?)),
        }
    }
}

fn into_multipart(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&mime)
                    .map_err(|e| ApiError::InvalidInput(format!("Invalid mime type {}: {}", mime, e)))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
