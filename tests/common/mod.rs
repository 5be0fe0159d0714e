//! Shared utilities for integration testing: an in-process mock of the
//! Contentstack delivery API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use route_resolver::config::CmsConfig;

pub const API_KEY: &str = "blt-test";
pub const DELIVERY_TOKEN: &str = "cs-test";
pub const ENVIRONMENT: &str = "test";

/// Collection whose entry fetches answer 200 with a non-JSON body.
pub const BROKEN_CONTENT_TYPE: &str = "broken";

#[derive(Clone, Default)]
struct MockState {
    collections: Arc<HashMap<String, Vec<Value>>>,
    hits: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

/// Handle to a running mock CMS.
pub struct MockCms {
    pub addr: SocketAddr,
    hits: Arc<Mutex<Vec<String>>>,
}

impl MockCms {
    /// Requests seen so far, as `find <ct> <value>` / `fetch <ct> <uid>`.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> usize {
        self.hits().iter().filter(|h| h.starts_with("fetch ")).count()
    }

    /// Client configuration pointing at this mock.
    pub fn cms_config(&self) -> CmsConfig {
        CmsConfig {
            base_url: format!("http://{}", self.addr),
            api_key: API_KEY.to_string(),
            delivery_token: DELIVERY_TOKEN.to_string(),
            environment: ENVIRONMENT.to_string(),
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            live_preview: None,
        }
    }
}

/// Routing and content fixtures shared by the tests.
pub fn fixtures() -> HashMap<String, Vec<Value>> {
    let mut collections = HashMap::new();
    collections.insert(
        "routing".to_string(),
        vec![
            json!({"uid": "r1", "url_path": "/blog/ai", "content_type_uid": "blog", "entry_uid": "e1", "template": "blog"}),
            json!({"uid": "r2", "url_path": "about", "content_type_uid": "page", "entry_id": "p1"}),
            json!({"uid": "r3", "url_path": "/gone", "content_type_uid": "page", "entry_uid": "deleted"}),
            json!({"uid": "r4", "url_path": "/broken", "content_type_uid": BROKEN_CONTENT_TYPE, "entry_uid": "b1"}),
            json!({"uid": "r5", "url_path": "/half", "entry_uid": "p1"}),
        ],
    );
    collections.insert(
        "blog".to_string(),
        vec![json!({"uid": "e1", "title": "AI", "body": "<p>Artificial</p>", "author": "Ada"})],
    );
    collections.insert(
        "page".to_string(),
        vec![json!({"uid": "p1", "title": "About"})],
    );
    collections
}

/// Start a mock CMS on an ephemeral port.
pub async fn start_mock_cms(collections: HashMap<String, Vec<Value>>) -> MockCms {
    start_mock_cms_with_delay(collections, None).await
}

/// Start a mock CMS that sleeps for `delay` before answering.
pub async fn start_mock_cms_with_delay(
    collections: HashMap<String, Vec<Value>>,
    delay: Option<Duration>,
) -> MockCms {
    let state = MockState {
        collections: Arc::new(collections),
        hits: Arc::new(Mutex::new(Vec::new())),
        delay,
    };
    let hits = state.hits.clone();

    let app = Router::new()
        .route("/v3/content_types/{ct}/entries", get(find_entries))
        .route("/v3/content_types/{ct}/entries/{uid}", get(fetch_entry))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockCms { addr, hits }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("api_key").and_then(|v| v.to_str().ok()) == Some(API_KEY)
        && headers.get("access_token").and_then(|v| v.to_str().ok()) == Some(DELIVERY_TOKEN)
}

fn api_error(status: StatusCode, message: &str, code: u32) -> Response {
    (status, Json(json!({"error_message": message, "error_code": code}))).into_response()
}

async fn find_entries(
    State(state): State<MockState>,
    Path(ct): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    if !authorized(&headers) {
        return api_error(StatusCode::UNAUTHORIZED, "Access denied.", 104);
    }
    if params.get("environment").map(String::as_str) != Some(ENVIRONMENT) {
        return api_error(StatusCode::UNPROCESSABLE_ENTITY, "Environment was not found.", 118);
    }

    let filter: HashMap<String, String> = params
        .get("query")
        .and_then(|q| serde_json::from_str(q).ok())
        .unwrap_or_default();
    let (field, value) = filter.into_iter().next().unwrap_or_default();
    state.hits.lock().unwrap().push(format!("find {} {}", ct, value));

    let entries: Vec<Value> = state
        .collections
        .get(&ct)
        .map(|entries| {
            entries
                .iter()
                .filter(|e| e.get(&field).and_then(Value::as_str) == Some(value.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    Json(json!({ "entries": entries })).into_response()
}

async fn fetch_entry(
    State(state): State<MockState>,
    Path((ct, uid)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    if !authorized(&headers) {
        return api_error(StatusCode::UNAUTHORIZED, "Access denied.", 104);
    }
    state.hits.lock().unwrap().push(format!("fetch {} {}", ct, uid));

    if ct == BROKEN_CONTENT_TYPE {
        return (StatusCode::OK, "not json").into_response();
    }

    let entry = state
        .collections
        .get(&ct)
        .and_then(|entries| {
            entries
                .iter()
                .find(|e| e.get("uid").and_then(Value::as_str) == Some(uid.as_str()))
        })
        .cloned();

    match entry {
        Some(entry) => Json(json!({ "entry": entry })).into_response(),
        None => api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "The requested entry doesn't exist.",
            141,
        ),
    }
}
