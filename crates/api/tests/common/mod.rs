#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use bridge_api::config::{DatabaseConfig, ServerConfig};
use bridge_api::router::build_app_router;
use bridge_api::state::AppState;
use bridge_crm::CrmBackend;
use bridge_provisioning::ProvisioningBackend;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with both integrations in mock mode.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 45-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        app_env: "test".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 45,
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 5,
        },
        crm: CrmBackend::Mock {
            latency: Duration::ZERO,
        },
        provisioning: ProvisioningBackend::Mock {
            latency: Duration::ZERO,
        },
    }
}

/// Build the full application router for `config`, using the given pool.
pub fn build_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone()).unwrap();
    build_app_router(state, &config)
}

/// Build the full application router with the default test configuration.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with(pool, test_config())
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Send a GET request to `uri`.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body to `uri`.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

/// Send a POST request with an arbitrary body labelled as JSON.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Status and parsed body in one step.
pub async fn status_and_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    (status, body_json(response).await)
}
