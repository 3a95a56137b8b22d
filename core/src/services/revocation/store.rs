use std::sync::Arc;

use tracing::{debug, error, info};

use crate::clock::Clock;
use crate::domain::entities::AccountId;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RevocationCache;

use super::config::RevocationStoreConfig;

const MASS_LOGOUT_KEY: &str = "users:mass_logout";

fn kick_key(id: AccountId) -> String {
    format!("users:kick:{}", id)
}

fn ban_key(id: AccountId) -> String {
    format!("users:ban:{}", id)
}

/// Reads and writes revocation facts
///
/// Absent keys mean "not revoked". Cache failures are returned as errors and
/// never read as absence.
pub struct RevocationStore<C: RevocationCache> {
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
    config: RevocationStoreConfig,
}

impl<C: RevocationCache> RevocationStore<C> {
    pub fn new(cache: Arc<C>, clock: Arc<dyn Clock>, config: RevocationStoreConfig) -> Self {
        Self {
            cache,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &RevocationStoreConfig {
        &self.config
    }

    pub async fn ping(&self) -> DomainResult<()> {
        self.cache.ping().await
    }

    /// Active mass-logout cutover as a Unix timestamp
    pub async fn get_mass_logout_cutover(&self) -> DomainResult<Option<i64>> {
        let value = self.cache.get(MASS_LOGOUT_KEY).await.map_err(|e| {
            error!(error = %e, "Failed to read mass logout cutover");
            e
        })?;

        match value {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<i64>().map(Some).map_err(|_| {
                error!(value = %raw, "Corrupt mass logout cutover");
                DomainError::store("corrupt mass logout cutover value")
            }),
        }
    }

    /// Record `now` as the cutover, kept for `ttl_seconds`
    pub async fn activate_mass_logout(&self, ttl_seconds: i64) -> DomainResult<i64> {
        let now = self.clock.now();
        self.cache
            .set_with_ttl(MASS_LOGOUT_KEY, &now.to_string(), ttl_seconds)
            .await?;
        info!(cutover = now, ttl_seconds, "Mass logout activated");
        Ok(now)
    }

    /// Remove the cutover immediately
    pub async fn deactivate_mass_logout(&self) -> DomainResult<()> {
        let existed = self.cache.delete(MASS_LOGOUT_KEY).await?;
        info!(existed, "Mass logout deactivated");
        Ok(())
    }

    /// Force the account to log in again
    pub async fn kick(&self, id: AccountId) -> DomainResult<()> {
        let now = self.clock.now();
        self.cache
            .set_with_ttl(&kick_key(id), &now.to_string(), self.config.kick_ttl)
            .await
    }

    pub async fn unkick(&self, id: AccountId) -> DomainResult<()> {
        let existed = self.cache.delete(&kick_key(id)).await?;
        debug!(account_id = id, existed, "Kick flag cleared");
        Ok(())
    }

    pub async fn is_kicked(&self, id: AccountId) -> DomainResult<bool> {
        Ok(self.cache.get(&kick_key(id)).await?.is_some())
    }

    /// Flag the account as banned for the recent-ban window
    pub async fn mark_recently_banned(&self, id: AccountId) -> DomainResult<()> {
        let now = self.clock.now();
        self.cache
            .set_with_ttl(&ban_key(id), &now.to_string(), self.config.recent_ban_ttl)
            .await
    }

    pub async fn was_recently_banned(&self, id: AccountId) -> DomainResult<bool> {
        Ok(self.cache.get(&ban_key(id)).await?.is_some())
    }
}
