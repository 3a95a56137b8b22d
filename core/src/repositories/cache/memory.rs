//! In-process revocation cache with lazy TTL expiry

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::errors::DomainError;

use super::r#trait::RevocationCache;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: i64,
}

/// Map-backed cache; entries past their deadline are dropped on read
#[derive(Clone)]
pub struct InMemoryRevocationCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
    failing: Arc<AtomicBool>,
}

impl InMemoryRevocationCache {
    /// Create a cache driven by the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a cache driven by `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::store("in-memory cache is failing"));
        }
        Ok(())
    }
}

impl Default for InMemoryRevocationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationCache for InMemoryRevocationCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check()?;
        let now = self.clock.now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            debug!(key, "Evicting expired cache entry");
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<(), DomainError> {
        self.check()?;
        let expires_at = self.clock.now() + ttl_seconds;
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.check()?;
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(key)
            .is_some_and(|entry| entry.expires_at > now))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.check()
    }
}
