//! Configuration management for the alumni gateway.
//!
//! Loads configuration from environment variables (and an optional `.env`
//! file). The backend base URL comes from `NEXT_PUBLIC_API_URL` so the
//! gateway can share an env file with the portal front end.

use std::env;
use std::sync::OnceLock;
use std::time::Duration;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub cookie: CookieConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the portal backend, without a trailing slash.
    pub api_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub secure: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "3000").parse().unwrap_or(3000),
                max_body_bytes: env_or("MAX_BODY_BYTES", "1048576")
                    .parse()
                    .unwrap_or(1024 * 1024), // 1MB
                cors_allowed_origins: parse_origins(&env_or("CORS_ALLOWED_ORIGINS", "*")),
            },
            backend: BackendConfig {
                api_url: normalize_base_url(&env_or("NEXT_PUBLIC_API_URL", "http://localhost:5000")),
                timeout: Duration::from_secs(
                    env_or("BACKEND_TIMEOUT_SECS", "30").parse().unwrap_or(30),
                ),
            },
            cookie: CookieConfig {
                secure: env_or("COOKIE_SECURE", "false").to_lowercase() == "true",
            },
            logging: LoggingConfig {
                format: env_or("LOG_FORMAT", "pretty")
                    .parse()
                    .unwrap_or(LogFormat::Pretty),
            },
        }
    }

    /// Configuration pointing at an explicit backend, with defaults elsewhere.
    ///
    /// Used by tests and embedders that do not want to read the environment.
    pub fn with_backend(api_url: &str) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                max_body_bytes: 1024 * 1024,
                cors_allowed_origins: Vec::new(),
            },
            backend: BackendConfig {
                api_url: normalize_base_url(api_url),
                timeout: Duration::from_secs(30),
            },
            cookie: CookieConfig { secure: false },
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "*")
        .map(String::from)
        .collect()
}
