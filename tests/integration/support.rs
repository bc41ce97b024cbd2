//! In-process fake of the collaborative process API.
//!
//! Serves the list / get / create / update / delete endpoints for every
//! entity, the full process payload and role assignment from an in-memory
//! store. Each server runs on its own thread and runtime so that both async
//! tests and the blocking `RunContext` can talk to it.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// In-memory API state.
#[derive(Debug, Default)]
pub struct FakeApi {
    records: HashMap<&'static str, Vec<Value>>,
    assignments: HashMap<i64, Vec<i64>>,
    requests: Vec<RecordedRequest>,
    next_id: i64,
    /// Answer every request with a 500.
    pub outage: bool,
}

const ENTITIES: &[&str] = &[
    "colaborative_process",
    "round",
    "child_activity",
    "practice",
    "thinklet",
    "pattern",
    "role",
];

fn entity(segment: &str) -> Option<&'static str> {
    ENTITIES.iter().copied().find(|name| *name == segment)
}

fn id_key(entity: &str) -> &'static str {
    match entity {
        "colaborative_process" => "id_process",
        "round" | "child_activity" => "id_activity",
        "practice" => "id_practice",
        "thinklet" => "id_thinklet",
        "pattern" => "id_pattern",
        _ => "id_role",
    }
}

fn record_id(entity: &str, record: &Value) -> Option<i64> {
    record.get(id_key(entity)).and_then(Value::as_i64)
}

impl FakeApi {
    pub fn empty() -> Self {
        Self {
            next_id: 1000,
            ..Self::default()
        }
    }

    /// One process ("Design Workshop", id 1) with a round, a grouped, an
    /// ungrouped and an orphaned activity, plus catalog records.
    pub fn seeded() -> Self {
        let mut api = Self::empty();
        api.insert(
            "colaborative_process",
            json!({
                "id_process": 1,
                "name_process": "Design Workshop",
                "description_process": "Two day design sprint",
                "version_process": "1.2",
                "image": "workshop.png"
            }),
        );
        api.insert(
            "colaborative_process",
            json!({
                "id_process": 2,
                "name_process": "Árbol de problemas",
                "description_process": null
            }),
        );
        api.insert(
            "round",
            json!({
                "id_activity": 10,
                "name_activity": "Ideation",
                "description_activity": "Generate options",
                "round_status": "APLICAR_ESTRATEGIA",
                "iterative": true,
                "id_process": 1,
                "subActivities": [
                    { "id_activity": 101, "name_activity": "PLANEAR_ESTRATEGIA" },
                    { "id_activity": 102, "name_activity": "APLICAR_ESTRATEGIA" },
                    { "id_activity": 103, "name_activity": "REVISAR_ESTRATEGIA" },
                    { "id_activity": 104, "name_activity": "ANALIZAR_ESTRATEGIA" }
                ]
            }),
        );
        api.insert(
            "round",
            json!({
                "id_activity": 11,
                "name_activity": "Convergence",
                "round_status": null,
                "id_process": 1
            }),
        );
        api.insert(
            "child_activity",
            json!({
                "id_activity": 20,
                "name_activity": "Brainstorm",
                "description_activity": "Silent ideation",
                "iterative": true,
                "id_process": 1,
                "parent_round_id": 10,
                "id_practice": 30,
                "name_practice": "Free brainstorming",
                "id_thinklet": 40,
                "name_thinklet": "FreeBrainstorm",
                "assignedRoles": [
                    { "id_role": 1, "name_role": "Facilitator" }
                ]
            }),
        );
        api.insert(
            "child_activity",
            json!({
                "id_activity": 21,
                "name_activity": "Kick-off",
                "iterative": false,
                "id_process": 1,
                "parent_round_id": null
            }),
        );
        api.insert(
            "child_activity",
            json!({
                "id_activity": 22,
                "name_activity": "Stray vote",
                "id_process": 1,
                "parent_round_id": 99
            }),
        );
        api.insert(
            "practice",
            json!({
                "id_practice": 30,
                "name_practice": "Free brainstorming",
                "description_practice": "Open idea generation",
                "type_practice": "generate"
            }),
        );
        api.insert(
            "pattern",
            json!({
                "id_pattern": 50,
                "name_pattern": "Generate",
                "description_pattern": "Move from fewer to more concepts"
            }),
        );
        api.insert(
            "thinklet",
            json!({
                "id_thinklet": 40,
                "name_thinklet": "FreeBrainstorm",
                "description_thinklet": "Participants add ideas to shared pages",
                "id_pattern": 50
            }),
        );
        api.insert(
            "role",
            json!({
                "id_role": 1,
                "name_role": "Facilitator",
                "description_role": "Guides the session",
                "skills_role": "moderation"
            }),
        );
        api.insert(
            "role",
            json!({
                "id_role": 2,
                "name_role": "Scribe",
                "description_role": "Keeps the minutes",
                "skills_role": "writing"
            }),
        );
        api.assignments.insert(20, vec![1]);
        api
    }

    pub fn insert(&mut self, entity: &'static str, record: Value) {
        self.records.entry(entity).or_default().push(record);
    }

    pub fn record(&self, entity: &str, id: i64) -> Option<&Value> {
        self.records
            .get(entity)?
            .iter()
            .find(|record| record_id(entity, record) == Some(id))
    }

    pub fn count(&self, entity: &str) -> usize {
        self.records.get(entity).map_or(0, Vec::len)
    }

    pub fn assigned(&self, activity_id: i64) -> Vec<i64> {
        self.assignments.get(&activity_id).cloned().unwrap_or_default()
    }

    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }

    fn full_process(&self, id: i64) -> Option<Value> {
        let mut full = self.record("colaborative_process", id)?.clone();
        let in_process = |entity: &str| -> Vec<Value> {
            self.records
                .get(entity)
                .map(|records| {
                    records
                        .iter()
                        .filter(|r| r.get("id_process").and_then(Value::as_i64) == Some(id))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };
        full["rounds"] = Value::Array(in_process("round"));
        full["activities"] = Value::Array(in_process("child_activity"));
        Some(full)
    }

    fn create(&mut self, entity: &'static str, fields: Map<String, Value>) -> Value {
        self.next_id += 1;
        let mut record = Value::Object(fields);
        record[id_key(entity)] = json!(self.next_id);
        self.insert(entity, record.clone());
        record
    }

    fn update(&mut self, entity: &str, id: i64, fields: Map<String, Value>) -> bool {
        let Some(records) = self.records.get_mut(entity) else {
            return false;
        };
        let Some(record) = records
            .iter_mut()
            .find(|record| record_id(entity, record) == Some(id))
        else {
            return false;
        };
        if let Value::Object(existing) = record {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        true
    }

    fn delete(&mut self, entity: &str, id: i64) -> bool {
        let Some(records) = self.records.get_mut(entity) else {
            return false;
        };
        let before = records.len();
        records.retain(|record| record_id(entity, record) != Some(id));
        records.len() != before
    }

    fn roles_for(&self, activity_id: i64) -> Vec<Value> {
        self.assigned(activity_id)
            .into_iter()
            .filter_map(|role_id| self.record("role", role_id).cloned())
            .collect()
    }
}

/// Decoded create/update body: JSON object or multipart text fields.
fn body_fields(content_type: Option<&str>, body: &[u8]) -> Option<Map<String, Value>> {
    match content_type {
        Some(ct) if ct.starts_with("multipart/form-data") => {
            let boundary = ct.split("boundary=").nth(1)?.trim_matches('"');
            Some(multipart_fields(&String::from_utf8_lossy(body), boundary))
        }
        _ => match serde_json::from_slice(body).ok()? {
            Value::Object(map) => Some(map),
            _ => None,
        },
    }
}

/// Text parts of a multipart body. File parts are recorded by name only.
fn multipart_fields(body: &str, boundary: &str) -> Map<String, Value> {
    let delimiter = format!("--{}", boundary);
    let mut fields = Map::new();
    for part in body.split(delimiter.as_str()) {
        let Some((headers, value)) = part.split_once("\r\n\r\n") else {
            continue;
        };
        let Some(name) = headers
            .split("name=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
        else {
            continue;
        };
        if let Some(file_name) = headers
            .split("filename=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
        {
            fields.insert(name.to_string(), json!(file_name));
        } else {
            fields.insert(name.to_string(), json!(value.trim_end_matches("\r\n")));
        }
    }
    fields
}

type Shared = Arc<Mutex<FakeApi>>;

fn number(segment: &str) -> Option<i64> {
    segment.parse().ok()
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{} not found", what)).into_response()
}

async fn dispatch(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let mut api = state.lock().unwrap_or_else(|e| e.into_inner());
    api.requests.push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        content_type: content_type.clone(),
        body: body.to_vec(),
    });

    if api.outage {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }
    let Some(path) = uri.path().strip_prefix("/api/") else {
        return not_found("route");
    };
    let segments: Vec<&str> = path.split('/').collect();

    match (method, segments.as_slice()) {
        (Method::GET, ["colaborative_process", "full", id]) => {
            match number(id).and_then(|id| api.full_process(id)) {
                Some(full) => Json(full).into_response(),
                None => not_found("process"),
            }
        }
        (Method::GET, ["child_activity", id, "roles"]) => match number(id) {
            Some(id) if api.record("child_activity", id).is_some() => {
                Json(json!({ "assignedRoles": api.roles_for(id) })).into_response()
            }
            _ => not_found("activity"),
        },
        (Method::POST, [role, "assign", activity]) => {
            match (number(role), number(activity)) {
                (Some(role), Some(activity)) if api.record("child_activity", activity).is_some() => {
                    let roles = api.assignments.entry(activity).or_default();
                    if !roles.contains(&role) {
                        roles.push(role);
                    }
                    StatusCode::OK.into_response()
                }
                _ => not_found("activity"),
            }
        }
        (Method::DELETE, [role, "unassign", activity]) => {
            match (number(role), number(activity)) {
                (Some(role), Some(activity)) => {
                    if let Some(roles) = api.assignments.get_mut(&activity) {
                        roles.retain(|r| *r != role);
                    }
                    StatusCode::NO_CONTENT.into_response()
                }
                _ => not_found("activity"),
            }
        }
        (Method::GET, [name, "list"]) => match entity(name) {
            Some(entity) => {
                Json(Value::Array(api.records.get(entity).cloned().unwrap_or_default()))
                    .into_response()
            }
            None => not_found("route"),
        },
        (Method::POST, [name, "create"]) => {
            let Some(entity) = entity(name) else {
                return not_found("route");
            };
            let Some(fields) = body_fields(content_type.as_deref(), &body) else {
                return (StatusCode::BAD_REQUEST, "unreadable body").into_response();
            };
            let record = api.create(entity, fields);
            // Processes are created without echoing the record back.
            if entity == "colaborative_process" {
                StatusCode::CREATED.into_response()
            } else {
                (StatusCode::CREATED, Json(record)).into_response()
            }
        }
        (Method::PATCH, [name, "update", id]) => {
            let (Some(entity), Some(id)) = (entity(name), number(id)) else {
                return not_found("route");
            };
            let Some(fields) = body_fields(content_type.as_deref(), &body) else {
                return (StatusCode::BAD_REQUEST, "unreadable body").into_response();
            };
            if api.update(entity, id, fields) {
                StatusCode::OK.into_response()
            } else {
                not_found(entity)
            }
        }
        (Method::DELETE, [name, "delete", id]) => {
            let (Some(entity), Some(id)) = (entity(name), number(id)) else {
                return not_found("route");
            };
            if api.delete(entity, id) {
                StatusCode::NO_CONTENT.into_response()
            } else {
                not_found(entity)
            }
        }
        (Method::GET, [name, id]) => {
            let (Some(entity), Some(id)) = (entity(name), number(id)) else {
                return not_found("route");
            };
            match api.record(entity, id) {
                Some(record) => Json(record.clone()).into_response(),
                None => not_found(entity),
            }
        }
        _ => not_found("route"),
    }
}

/// A running fake API.
pub struct FakeServer {
    pub base_url: String,
    state: Shared,
}

impl FakeServer {
    pub fn start(api: FakeApi) -> Self {
        let state: Shared = Arc::new(Mutex::new(api));
        let app = Router::new().fallback(dispatch).with_state(state.clone());
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        let addr = rx.recv().unwrap();
        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn seeded() -> Self {
        Self::start(FakeApi::seeded())
    }

    pub fn api(&self) -> MutexGuard<'_, FakeApi> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The most recent request matching `method` and `path`.
    pub fn last_request(&self, method: Method, path: &str) -> Option<RecordedRequest> {
        self.api()
            .requests()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }
}
