#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use catalog_core::compat::SemverCompatibility;
use catalog_core::service::TemplateService;
use catalog_core::testing::{MemoryStore, RecordingSync};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use catalog_api::config::ServerConfig;
use catalog_api::routes;
use catalog_api::state::AppState;

/// Public base URL used in every generated link.
pub const PUBLIC_URL: &str = "http://catalog.test";

/// Build a test `ServerConfig` with safe defaults.
///
/// Links are rendered against [`PUBLIC_URL`]. The sync URL is never contacted
/// because tests inject a [`RecordingSync`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_url: PUBLIC_URL.to_string(),
        sync_url: "http://sync.invalid".to_string(),
        sync_timeout_secs: 5,
    }
}

/// Build the full application router with all middleware layers, backed by
/// in-memory collaborators.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store: Arc<MemoryStore>, sync: Arc<RecordingSync>) -> Router {
    let state = AppState {
        templates: TemplateService::new(store, Arc::new(SemverCompatibility)),
        sync,
        config: Arc::new(test_config()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri).await
}

/// Send a bodiless POST request through the router.
pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri).await
}

async fn send(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
