//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token keys and lifetimes, revocation, password and captcha strategies
//! - `cache` - Redis configuration for the revocation cache
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and cookie configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use auth::{
    AdminSeedConfig, AuthConfig, CaptchaConfig, JwtConfig, PasswordConfig, RevocationConfig,
};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CookieConfig, ServerConfig};

/// Where accounts and revocation facts are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MySQL directory and Redis revocation cache
    External,
    /// In-process directory and cache (development and tests)
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "external" | "mysql" | "redis" => Ok(StorageBackend::External),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Storage backend selection
    pub storage: StorageBackend,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Reads a `.env` file first when one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();

        Self {
            environment,
            storage: env_or("STORAGE_BACKEND", StorageBackend::External),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when it
/// is missing or does not parse
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read an environment variable, treating an empty value as unset
pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("MySQL".parse::<StorageBackend>().unwrap(), StorageBackend::External);
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        temp_env::with_var("FA_TEST_NUMBER", Some("not-a-number"), || {
            assert_eq!(env_or("FA_TEST_NUMBER", 7u32), 7);
        });
        temp_env::with_var("FA_TEST_NUMBER", Some("42"), || {
            assert_eq!(env_or("FA_TEST_NUMBER", 7u32), 42);
        });
    }

    #[test]
    fn test_app_config_from_env_memory_backend() {
        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", Some("memory")),
                ("LOG_LEVEL", Some("trace")),
                ("ENVIRONMENT", Some("production")),
                ("APP_ENV", None),
                ("LOG_FORMAT", None),
            ],
            || {
                let config = AppConfig::from_env();
                assert_eq!(config.storage, StorageBackend::Memory);
                assert_eq!(config.environment, Environment::Production);
                assert_eq!(config.logging.level, "trace");
                assert_eq!(config.logging.format, LogFormat::Json);
            },
        );
    }
}
