//! Shared configuration and wire types for the Fauth server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types loaded from the environment
//! - The error response structure returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AdminSeedConfig, AppConfig, AuthConfig, CacheConfig, CaptchaConfig, CookieConfig, DatabaseConfig,
    Environment, JwtConfig, LogFormat, LoggingConfig, PasswordConfig, RevocationConfig,
    ServerConfig, StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
