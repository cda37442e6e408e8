//! Health, readiness and metrics endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::Value;
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use common::{setup, setup_unreachable};

#[tokio::test]
async fn test_health_reports_version() {
    let (server, _backend) = setup().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_ready_when_backend_answers() {
    let (server, backend) = setup().await;
    // Any HTTP answer counts as reachable.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(404))
        .mount(&backend)
        .await;

    let response = server.get("/health/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"][0]["name"], "backend");
}

#[tokio::test]
async fn test_not_ready_when_backend_down() {
    let server = setup_unreachable();

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["checks"][0]["status"], "unhealthy");
}

#[tokio::test]
async fn test_metrics_exposition() {
    let (server, _backend) = setup().await;

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("# TYPE alumni_gateway_requests_total counter"));
    assert!(text.contains("alumni_gateway_upstream_failures_total"));
    assert!(text.contains("alumni_gateway_up 1"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (server, _backend) = setup().await;

    server
        .get("/api/nope")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
