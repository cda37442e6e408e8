//! Error types for the alumni gateway.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system. Every error renders as a JSON body with
//! a `message` field, which is what the portal UI shows in its toasts.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::services::BackendError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Auth errors
    #[error("{0}")]
    Unauthenticated(String),

    // Validation errors
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidInput(String),

    // Backend errors
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
        detail: Value,
    },

    /// The backend could not be reached or sent something unreadable.
    #[error("{message}")]
    Unavailable { message: String, detail: String },

    // Generic errors
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Convert a failed backend call, using `fallback` when the backend did
    /// not supply a message of its own.
    pub fn from_backend(err: BackendError, fallback: &str) -> Self {
        match err {
            BackendError::Status { status, body } => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(fallback)
                    .to_string();
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                Self::Upstream {
                    status,
                    message,
                    detail: body,
                }
            }
            other => Self::Unavailable {
                message: fallback.to_string(),
                detail: other.to_string(),
            },
        }
    }

    /// Convert a failed backend call, always answering with `message` and
    /// carrying the backend body (or transport error) in `error`.
    pub fn from_backend_fixed(err: BackendError, message: &str) -> Self {
        match err {
            BackendError::Status { status, body } => Self::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: message.to_string(),
                detail: body,
            },
            other => Self::Unavailable {
                message: message.to_string(),
                detail: other.to_string(),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            // 401
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,

            // 400
            Self::Validation(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // Relayed
            Self::Upstream { status, .. } => *status,

            // 500
            Self::Unavailable { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Self::Upstream {
                message, detail, ..
            } => json!({
                "message": message,
                "error": detail,
            }),
            Self::Unavailable { message, detail } => json!({
                "message": message,
                "error": detail,
            }),
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for Error {
    fn from(_: QueryRejection) -> Self {
        Self::InvalidInput("Invalid query parameters".to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(_: serde_json::Error) -> Self {
        Self::InvalidInput("Invalid JSON body".to_string())
    }
}
