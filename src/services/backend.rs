//! Client for the portal backend.
//!
//! Every API route ends in exactly one call through this client. It owns the
//! pooled HTTP connection, attaches the caller's bearer token and request id,
//! and separates backend-reported failures (non-2xx) from transport failures
//! so handlers can relay the former and normalize the latter.

use std::time::{Duration, Instant};

use reqwest::{header, Client, Method};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::BackendConfig;
use crate::middleware::REQUEST_ID_HEADER;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Errors from a backend call.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend answered, but not with a 2xx status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Value },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// A successful backend answer, relayed to the caller unchanged.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    pub body: Value,
}

/// A single forwarded call.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    method: Method,
    path: String,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
    token: Option<String>,
    request_id: Option<String>,
}

impl BackendRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
            token: None,
            request_id: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a caller-supplied path segment (percent-encoded).
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Append a literal path suffix after any segments.
    pub fn suffix(mut self, suffix: &str) -> Self {
        self.segments
            .extend(suffix.split('/').filter(|s| !s.is_empty()).map(String::from));
        self
    }

    /// Add query parameters, skipping absent or empty values.
    pub fn query<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Option<String>)>,
    {
        for (key, value) in params {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                self.query.push((key, value));
            }
        }
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.token = token.map(String::from);
        self
    }

    pub fn request_id(mut self, request_id: Option<&str>) -> Self {
        self.request_id = request_id.map(String::from);
        self
    }
}

/// Service for calls to the portal backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("alumni-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Url::parse(&config.api_url).map_err(|_| BackendError::InvalidUrl(config.api_url.clone()))?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    /// Build the full backend URL for a request.
    pub fn url_for(&self, request: &BackendRequest) -> Result<Url, BackendError> {
        let raw = format!("{}{}", self.base_url, request.path);
        let mut url = Url::parse(&raw).map_err(|_| BackendError::InvalidUrl(raw.clone()))?;

        if !request.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| BackendError::InvalidUrl(raw.clone()))?
                .pop_if_empty()
                .extend(&request.segments);
        }

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Forward a request and return the backend's answer.
    ///
    /// Non-2xx answers become [`BackendError::Status`] carrying the decoded
    /// body so the caller can relay the backend's own message.
    pub async fn send(&self, request: BackendRequest) -> Result<BackendResponse, BackendError> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, %url, "Forwarding to backend");

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(request_id) = &request.request_id {
            builder = builder.header(REQUEST_ID_HEADER, request_id);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = decode_body(&bytes);

        if (200..300).contains(&status) {
            Ok(BackendResponse { status, body })
        } else {
            Err(BackendError::Status { status, body })
        }
    }

    /// Check that the backend answers HTTP at all. Any status counts.
    pub async fn probe(&self) -> Result<Duration, BackendError> {
        let start = Instant::now();
        self.client
            .get(&self.base_url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await?;
        Ok(start.elapsed())
    }
}

/// Decode a backend body. Empty bodies become `null`; non-JSON text is kept
/// as a JSON string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
