//! Forward-and-relay helpers shared by every route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::api::status;
use crate::error::{Error, Result};
use crate::middleware::Caller;
use crate::services::{BackendError, BackendRequest, BackendResponse};
use crate::AppState;

/// Send a request to the backend, logging and counting failures.
///
/// `context` names the operation in logs. The bearer token is whatever the
/// handler attached to `request`; only the request id is taken from `caller`.
pub async fn send(
    state: &AppState,
    caller: &Caller,
    request: BackendRequest,
    context: &str,
) -> std::result::Result<BackendResponse, BackendError> {
    let request = request.request_id(caller.request_id());

    state.backend.send(request).await.map_err(|err| {
        status::inc_upstream_failure_count();
        match &err {
            BackendError::Status { status, body } => {
                warn!(
                    request_id = caller.request_id().unwrap_or("-"),
                    status,
                    body = %body,
                    "{}",
                    context
                );
            }
            other => {
                error!(
                    request_id = caller.request_id().unwrap_or("-"),
                    error = %other,
                    "{}",
                    context
                );
            }
        }
        err
    })
}

/// Send a request, converting failures with `fallback` as the message of
/// last resort.
pub async fn forward(
    state: &AppState,
    caller: &Caller,
    request: BackendRequest,
    fallback: &str,
) -> Result<BackendResponse> {
    send(state, caller, request, fallback)
        .await
        .map_err(|err| Error::from_backend(err, fallback))
}

/// Forward and relay the backend's status and body unchanged.
pub async fn proxy(
    state: &AppState,
    caller: &Caller,
    request: BackendRequest,
    fallback: &str,
) -> Result<Response> {
    forward(state, caller, request, fallback).await.map(relay)
}

/// Turn a backend answer into a response with the same status and body.
pub fn relay(response: BackendResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
    (status, Json(response.body)).into_response()
}
