//! Request id assignment and request accounting.
//!
//! Every request gets an `X-Request-Id` (the caller's, if it sent a sane
//! one). The id is stored in request extensions, echoed on the response and
//! forwarded to the backend so both sides log the same id.

use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::status;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id injected into request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Middleware that assigns a request id and counts requests and 5xx errors.
pub async fn track_request(mut req: Request<Body>, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN)
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));
    status::inc_request_count();

    let mut response = next.run(req).await;

    if response.status().is_server_error() {
        status::inc_error_count();
    }
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
