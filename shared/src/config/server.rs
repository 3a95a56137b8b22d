//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Deadline for a single request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Session cookie settings
    #[serde(default)]
    pub cookies: CookieConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            request_timeout: default_request_timeout(),
            cookies: CookieConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("SERVER_HOST", defaults.host),
            port: env_or("SERVER_PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
            request_timeout: env_or("SERVER_REQUEST_TIMEOUT", defaults.request_timeout),
            cookies: CookieConfig::from_env(),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cookies carrying the access and refresh tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Access token cookie name
    pub access_name: String,

    /// Refresh token cookie name
    pub refresh_name: String,

    /// Cookie domain; host-only when unset
    #[serde(default)]
    pub domain: Option<String>,

    /// Send cookies over HTTPS only
    #[serde(default)]
    pub secure: bool,

    /// Cookie path
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_name: String::from("access_c"),
            refresh_name: String::from("refresh_c"),
            domain: None,
            secure: false,
            path: String::from("/"),
        }
    }
}

impl CookieConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_name: env_or("ACCESS_COOKIE_NAME", defaults.access_name),
            refresh_name: env_or("REFRESH_COOKIE_NAME", defaults.refresh_name),
            domain: env_opt("COOKIE_DOMAIN"),
            secure: env_or("COOKIE_SECURE", defaults.secure),
            path: defaults.path,
        }
    }
}

fn default_request_timeout() -> u64 {
    30 // 30 seconds
}
