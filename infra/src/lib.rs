//! # Infrastructure Layer
//!
//! Concrete adapters for the ports defined in `fa_core`:
//! - **Cache**: Redis client holding revocation facts
//! - **Database**: MySQL account directory using SQLx
//! - **Captcha**: Google reCAPTCHA verification over HTTP
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use fa_core::errors::DomainError;

/// Cache module - Redis client and operations
pub mod cache;

/// Captcha module - humanness verification against Google
pub mod captcha;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

pub use cache::RedisClient;
pub use captcha::ReCaptchaVerifier;
#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::store(err.to_string())
    }
}
