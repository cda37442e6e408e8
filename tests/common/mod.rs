//! Common test utilities and helpers.

#![allow(dead_code)]

use alumni_gateway::api;
use alumni_gateway::config::Config;
use alumni_gateway::AppState;
use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderValue,
};
use axum::Router;
use axum_test::{TestRequest, TestServer};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token-123";

/// Build the gateway router pointed at `backend_url`.
pub fn build_app(backend_url: &str) -> Router {
    let config = Config::with_backend(backend_url);
    let state = AppState::from_config(&config).expect("Failed to build state");
    Router::new().merge(api::routes()).with_state(state)
}

/// Start a mock backend and a gateway test server in front of it.
pub async fn setup() -> (TestServer, MockServer) {
    let backend = MockServer::start().await;
    let server = TestServer::new(build_app(&backend.uri())).expect("Failed to create test server");
    (server, backend)
}

/// Gateway whose backend refuses connections.
pub fn setup_unreachable() -> TestServer {
    TestServer::new(build_app("http://127.0.0.1:1")).expect("Failed to create test server")
}

/// Attach the session cookie the portal UI sends.
pub fn with_cookie(request: TestRequest) -> TestRequest {
    request.add_header(
        COOKIE,
        HeaderValue::from_str(&format!("token={}", TOKEN)).unwrap(),
    )
}

/// Attach an `Authorization: Bearer` header.
pub fn with_bearer(request: TestRequest) -> TestRequest {
    request.add_header(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", TOKEN)).unwrap(),
    )
}

pub fn bearer_value() -> String {
    format!("Bearer {}", TOKEN)
}

/// Number of requests the mock backend has seen.
pub async fn backend_calls(backend: &MockServer) -> usize {
    backend
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
