//! Application state for the alumni gateway.
//!
//! Contains the shared state that is passed to all handlers. Nothing in it
//! changes after start-up.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::services::BackendClient;
use crate::Result;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Portal backend client.
    pub backend: Arc<BackendClient>,
    /// Whether the login cookie is marked `Secure`.
    pub secure_cookies: bool,
}

impl AppState {
    /// Create application state from a configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = BackendClient::new(&config.backend)
            .map_err(|e| Error::Internal(format!("Failed to create backend client: {}", e)))?;

        Ok(Self {
            backend: Arc::new(backend),
            secure_cookies: config.cookie.secure,
        })
    }
}
