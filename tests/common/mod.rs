//! In-process mock of the LifeScope backend.
//!
//! Serves canned JSON per `(method, path)` and records every request it sees,
//! including the `Authorization` header and the decoded JSON body.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use lifescope::api::Api;
use lifescope::libs::navigation::Navigator;
use lifescope::libs::session::SessionStore;
use lifescope::libs::storage::{MemoryStorage, Storage};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    routes: Arc<Mutex<HashMap<(String, String), (u16, Value)>>>,
}

pub struct MockServer {
    pub base_url: String,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{}/api", addr),
            state,
            handle,
        }
    }

    /// Answers `method path` with `status` and `body` from now on.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let route = state.routes.lock().get(&(method.to_string(), path)).cloned();
    match route {
        Some((status, Value::Null)) => StatusCode::from_u16(status).unwrap().into_response(),
        Some((status, body)) => (StatusCode::from_u16(status).unwrap(), Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response(),
    }
}

/// Session store over in-memory storage, plus the API client bound to it.
pub struct Client {
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<Navigator>,
    pub session: Arc<SessionStore>,
    pub api: Api,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(Navigator::default());
        let session = Arc::new(SessionStore::new(storage.clone() as Arc<dyn Storage>, navigator.clone()));
        let api = Api::new(base_url, session.clone());
        Self {
            storage,
            navigator,
            session,
            api,
        }
    }

    /// Persists a session directly, as a previous login would have.
    pub fn sign_in(&self, token: &str) {
        self.storage.set("token", token).unwrap();
        self.storage
            .set("user", &json!({ "id": 1, "username": "alice", "email": "alice@example.com" }).to_string())
            .unwrap();
    }
}

pub fn user_json() -> Value {
    json!({ "id": 1, "username": "alice", "email": "alice@example.com" })
}

pub fn auth_json(token: &str) -> Value {
    json!({ "access": token, "refresh": "refresh-token", "user": user_json() })
}

pub fn task_json(id: i64, title: &str, role: &str, due: Option<&str>, quadrant: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "status": "not_started",
        "priority": 2,
        "quadrant": quadrant,
        "due_date": due,
        "role": 1,
        "role_name": role,
        "category": null,
        "is_completed": false,
        "completed_at": null,
        "estimated_hours": "0.00",
        "actual_hours": "0.00",
        "created_at": "2024-06-01T09:00:00Z",
        "updated_at": "2024-06-01T09:00:00Z"
    })
}

pub fn analytics_json() -> Value {
    json!({
        "total_tasks": 3,
        "completed_tasks": 1,
        "in_progress_tasks": 0,
        "overdue_tasks": 1,
        "completion_rate": 33.3,
        "by_priority": { "high": 1, "medium": 1, "low": 1 },
        "by_role": [{ "role__name": "Work", "count": 3 }],
        "by_quadrant": { "q1": 1, "q2": 1, "q3": 1, "q4": 0 },
        "quadrant_percentages": { "q1": 33.3, "q2": 33.3, "q3": 33.3, "q4": 0.0 },
        "tasks": []
    })
}
