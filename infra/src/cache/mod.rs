//! Cache module for Redis-based revocation facts
//!
//! Keys are written by `fa_core::services::RevocationStore` and may be
//! namespaced with `CacheConfig::key_prefix`.

pub mod redis_client;


pub use redis_client::RedisClient;
