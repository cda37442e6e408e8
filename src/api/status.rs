//! Status Routes
//!
//! Health checks and metrics.
//!
//! Routes:
//! - GET /health - Basic health check
//! - GET /health/ready - Readiness check (backend reachable)
//! - GET /health/live - Liveness check (server responding)
//! - GET /metrics - Prometheus metrics endpoint

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

// Global metrics (simple counters)
static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static UPSTREAM_FAILURE_COUNT: AtomicU64 = AtomicU64::new(0);
static STARTUP_TIME: OnceLock<Instant> = OnceLock::new();

/// Initialize startup time. Call this once at server start.
pub fn init_startup_time() {
    let _ = STARTUP_TIME.get_or_init(Instant::now);
}

/// Get uptime in seconds since server start.
fn get_uptime_seconds() -> u64 {
    STARTUP_TIME.get().map(|start| start.elapsed().as_secs()).unwrap_or(0)
}

/// Increment request counter.
pub fn inc_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Increment error counter (5xx responses).
pub fn inc_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Increment failed backend call counter.
pub fn inc_upstream_failure_count() {
    UPSTREAM_FAILURE_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Build status routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
        .route("/metrics", get(prometheus_metrics))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<DependencyCheck>,
}

#[derive(Debug, Serialize)]
pub struct DependencyCheck {
    pub name: String,
    pub status: HealthStatus,
    pub latency_ms: Option<u64>,
    pub message: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Basic health check.
///
/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: Utc::now(),
    })
}

/// Readiness check.
///
/// GET /health/ready
///
/// The gateway is ready when the backend answers HTTP. Returns 503 if not.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let backend_check = check_backend(&state).await;
    let ready = backend_check.status == HealthStatus::Healthy;

    let response = ReadinessResponse {
        ready,
        checks: vec![backend_check],
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness check.
///
/// GET /health/live
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// Prometheus metrics.
///
/// GET /metrics
async fn prometheus_metrics() -> impl IntoResponse {
    let total_requests = REQUEST_COUNT.load(Ordering::Relaxed);
    let total_errors = ERROR_COUNT.load(Ordering::Relaxed);
    let upstream_failures = UPSTREAM_FAILURE_COUNT.load(Ordering::Relaxed);

    let metrics = format!(
        r#"# HELP alumni_gateway_requests_total Total number of HTTP requests
# TYPE alumni_gateway_requests_total counter
alumni_gateway_requests_total {}

# HELP alumni_gateway_errors_total Total number of 5xx responses
# TYPE alumni_gateway_errors_total counter
alumni_gateway_errors_total {}

# HELP alumni_gateway_upstream_failures_total Backend calls that failed or returned non-2xx
# TYPE alumni_gateway_upstream_failures_total counter
alumni_gateway_upstream_failures_total {}

# HELP alumni_gateway_uptime_seconds Seconds since the server started
# TYPE alumni_gateway_uptime_seconds gauge
alumni_gateway_uptime_seconds {}

# HELP alumni_gateway_up Whether the service is up
# TYPE alumni_gateway_up gauge
alumni_gateway_up 1
"#,
        total_requests,
        total_errors,
        upstream_failures,
        get_uptime_seconds()
    );

    (
        StatusCode::OK,
        [(
            "Content-Type",
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn check_backend(state: &AppState) -> DependencyCheck {
    match state.backend.probe().await {
        Ok(latency) => DependencyCheck {
            name: "backend".into(),
            status: HealthStatus::Healthy,
            latency_ms: Some(latency.as_millis() as u64),
            message: None,
        },
        Err(e) => DependencyCheck {
            name: "backend".into(),
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(e.to_string()),
        },
    }
}
