//! Bearer token extraction.
//!
//! The gateway never validates tokens itself; it only finds them and passes
//! them on to the backend. Two sources are supported:
//! - the `token` cookie set at login (what the browser UI sends)
//! - `Authorization: Bearer {token}` headers (scripts and other clients)
//!
//! The cookie wins when both are present. Empty values count as absent.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;

use crate::error::{Error, Result};
use crate::middleware::RequestId;

/// Session cookie name.
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Extract token from the session cookie or the Authorization header.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE_NAME) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
}

/// Who is calling: their bearer token (if any) and the request id.
///
/// Extraction never fails; routes decide whether a token is required and
/// which message to answer with when it is missing.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    token: Option<String>,
    request_id: Option<String>,
}

impl Caller {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Require a token, failing with 401 and `message` otherwise.
    pub fn require_token(&self, message: &str) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| Error::unauthenticated(message))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers);
        let request_id = parts
            .extensions
            .get::<RequestId>()
            .map(|id| id.0.clone());
        Ok(Self { token, request_id })
    }
}
