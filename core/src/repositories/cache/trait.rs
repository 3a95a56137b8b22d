use async_trait::async_trait;

use crate::errors::DomainError;

/// Shared expiring key/value store
///
/// A missing key is `Ok(None)` / `Ok(false)`, never an error. Connection and
/// timeout failures surface as `DomainError::StoreUnavailable`.
#[async_trait]
pub trait RevocationCache: Send + Sync {
    /// Read a key
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write a key that disappears after `ttl_seconds`
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<(), DomainError>;

    /// Remove a key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Check that the store answers
    async fn ping(&self) -> Result<(), DomainError>;
}
