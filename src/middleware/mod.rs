//! Middleware and request extractors for the gateway.
//!
//! - `token_auth` - bearer token extraction from the `token` cookie or the
//!   `Authorization` header
//! - `request_id` - request id assignment and request/error counting

mod request_id;
mod token_auth;

pub use request_id::{track_request, RequestId, REQUEST_ID_HEADER};
pub use token_auth::{extract_token, Caller, TOKEN_COOKIE_NAME};
