//! Services used by the API routes.
//!
//! - `backend` - HTTP client for the portal backend
//! - `validation` - shared field and format checks

pub mod backend;
pub mod validation;

pub use backend::{BackendClient, BackendError, BackendRequest, BackendResponse};
