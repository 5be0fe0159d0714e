//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with page handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve each request path through the pipeline
//! - Map "no route" to 404 without exposing why

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::template::TemplateKind;
use crate::lifecycle::Shutdown;
use crate::pipeline::{ResolvedRoute, RoutePipeline};

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RoutePipeline>,
}

/// Body of a successful page response.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub template: TemplateKind,
    pub route: ResolvedRoute,
}

/// HTTP server exposing resolved pages.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(config: ServerConfig, pipeline: RoutePipeline) -> Self {
        let state = AppState {
            pipeline: Arc::new(pipeline),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/{*path}", get(page_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.request_timeout_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.request_timeout_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn root_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render(&state, "/", &headers).await
}

async fn page_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    render(&state, &format!("/{}", path), &headers).await
}

async fn render(state: &AppState, path: &str, headers: &HeaderMap) -> Response {
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::debug!(request_id = %request_id, path = %path, "Resolving page");

    match state.pipeline.resolve(path).await {
        Some(route) => {
            let template = TemplateKind::from_hint(route.template.as_deref());
            (StatusCode::OK, Json(PageResponse { template, route })).into_response()
        }
        None => {
            tracing::debug!(request_id = %request_id, path = %path, "Page not found");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "not found", "path": path })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let store = MemoryStore::new()
            .with_entry(
                "routing",
                json!({"url_path": "/blog/ai", "content_type_uid": "blog", "entry_uid": "e1", "template": "BLOG"}),
            )
            .with_entry(
                "routing",
                json!({"url_path": "/", "content_type_uid": "page", "entry_uid": "home"}),
            )
            .with_entry("blog", json!({"uid": "e1", "title": "AI"}))
            .with_entry("page", json!({"uid": "home", "title": "Home"}));
        HttpServer::new(ServerConfig::default(), RoutePipeline::new(Arc::new(store)))
    }

    async fn get(server: &HttpServer, uri: &str) -> (StatusCode, HeaderMap, Value) {
        let response = server
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_blog_page() {
        let (status, headers, body) = get(&server(), "/blog/ai").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers.contains_key(X_REQUEST_ID));
        assert_eq!(body["template"], "blog");
        assert_eq!(body["route"]["template"], "BLOG");
        assert_eq!(body["route"]["content_type_id"], "blog");
        assert_eq!(body["route"]["content"]["title"], "AI");
    }

    #[tokio::test]
    async fn test_home_page_uses_generic_template() {
        let (status, _, body) = get(&server(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], "page");
        assert_eq!(body["route"]["template"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let (status, _, body) = get(&server(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "not found", "path": "/nope"}));
    }
}
