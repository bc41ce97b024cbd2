//! Process API Client
//!
//! Typed async client for the remote collaborative process service. Every
//! entity is reached through the same list / get / create / update / delete
//! endpoints (see [`Resource`]); role assignment and the full process payload
//! have dedicated calls. Drafts are validated before any request is sent.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::model::{Draft, FullProcess, Role};
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub mod body;
pub mod resource;

pub use resource::Resource;

/// Source of full process payloads for the process view and export.
#[async_trait]
pub trait ProcessSource: Send + Sync {
    async fn full_process(&self, id: i64) -> Result<FullProcess, ApiError>;
}

fn build_http_client(config: &ApiConfig) -> Result<Client, ApiError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<body::RequestBody>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!(%method, %url, "Sending API request");
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = body.apply(request)?;
        }
        Ok(request.send().await?)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("{} (body: {})", e, preview(&bytes))))
    }

    /// List every record of `R`.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let response = self
            .send(Method::GET, &format!("{}/list", R::PATH), None)
            .await?;
        let response = check_status(response, R::KIND, None).await?;
        Self::json(response).await
    }

    /// Fetch one record of `R`.
    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        let response = self
            .send(Method::GET, &format!("{}/{}", R::PATH, id), None)
            .await?;
        let response = check_status(response, R::KIND, Some(id)).await?;
        Self::json(response).await
    }

    /// Create a record. Returns the created record when the API echoes it.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<Option<R>, ApiError> {
        draft.validate()?;
        let body = draft.to_body()?;
        let response = self
            .send(Method::POST, &format!("{}/create", R::PATH), Some(body))
            .await?;
        let response = check_status(response, R::KIND, None).await?;
        Ok(echoed::<R>(response).await)
    }

    /// Replace a record's editable fields.
    pub async fn update<R: Resource>(
        &self,
        id: i64,
        draft: &R::Draft,
    ) -> Result<Option<R>, ApiError> {
        draft.validate()?;
        let body = draft.to_body()?;
        let response = self
            .send(Method::PATCH, &format!("{}/update/{}", R::PATH, id), Some(body))
            .await?;
        let response = check_status(response, R::KIND, Some(id)).await?;
        Ok(echoed::<R>(response).await)
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .send(Method::DELETE, &format!("{}/delete/{}", R::PATH, id), None)
            .await?;
        check_status(response, R::KIND, Some(id)).await?;
        Ok(())
    }

    /// Roles currently assigned to an activity.
    pub async fn assigned_roles(&self, activity_id: i64) -> Result<Vec<Role>, ApiError> {
        #[derive(Deserialize)]
        struct AssignedRoles {
            #[serde(rename = "assignedRoles", default)]
            assigned_roles: Option<Vec<Role>>,
        }

        let response = self
            .send(
                Method::GET,
                &format!("child_activity/{}/roles", activity_id),
                None,
            )
            .await?;
        let response = check_status(response, "activity", Some(activity_id)).await?;
        let payload: AssignedRoles = Self::json(response).await?;
        Ok(payload.assigned_roles.unwrap_or_default())
    }

    pub async fn assign_role(&self, role_id: i64, activity_id: i64) -> Result<(), ApiError> {
        let response = self
            .send(
                Method::POST,
                &format!("{}/assign/{}", role_id, activity_id),
                None,
            )
            .await?;
        check_status(response, "activity", Some(activity_id)).await?;
        Ok(())
    }

    pub async fn unassign_role(&self, role_id: i64, activity_id: i64) -> Result<(), ApiError> {
        let response = self
            .send(
                Method::DELETE,
                &format!("{}/unassign/{}", role_id, activity_id),
                None,
            )
            .await?;
        check_status(response, "activity", Some(activity_id)).await?;
        Ok(())
    }
}

#[async_trait]
impl ProcessSource for ApiClient {
    async fn full_process(&self, id: i64) -> Result<FullProcess, ApiError> {
        let response = self
            .send(Method::GET, &format!("colaborative_process/full/{}", id), None)
            .await?;
        let response = check_status(response, "process", Some(id)).await?;
        Self::json(response).await
    }
}

/// Map non-2xx responses to errors. A 404 on an addressed record is `NotFound`.
async fn check_status(
    response: Response,
    entity: &'static str,
    id: Option<i64>,
) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(ApiError::NotFound { entity, id });
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

/// The API does not consistently echo created or updated records.
async fn echoed<R: Resource>(response: Response) -> Option<R> {
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, entity = R::KIND, "Failed to read mutation response body");
            return None;
        }
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(&bytes) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(error = %e, entity = R::KIND, "Mutation response is not a record");
            None
        }
    }
}

fn preview(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut out: String = text.chars().take(120).collect();
    if text.chars().count() > 120 {
        out.push_str("...");
    }
    out
}
