use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

use crate::domain::entities::{Account, AccountId};
use crate::domain::value_objects::MassLogoutStatus;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationCache, UserRepository};
use crate::services::revocation::RevocationStore;
use crate::services::token::TokenLifetimes;

/// Administrative revocation commands
///
/// Per-account commands check that the account exists before touching the
/// cache, so no facts are stored for unknown ids.
pub struct AdministrationService<U, C>
where
    U: UserRepository,
    C: RevocationCache,
{
    users: Arc<U>,
    revocation: Arc<RevocationStore<C>>,
    lifetimes: TokenLifetimes,
}

impl<U, C> AdministrationService<U, C>
where
    U: UserRepository,
    C: RevocationCache,
{
    pub fn new(
        users: Arc<U>,
        revocation: Arc<RevocationStore<C>>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            users,
            revocation,
            lifetimes,
        }
    }

    /// Deactivate the account
    ///
    /// The recent-ban flag is written before the directory so a concurrent
    /// refresh that already read the account still sees the ban.
    pub async fn ban(&self, id: AccountId) -> DomainResult<()> {
        self.require_account(id).await?;
        self.revocation.mark_recently_banned(id).await?;
        self.users.set_active(id, false).await?;
        info!(account_id = id, "Account banned");
        Ok(())
    }

    /// Reactivate the account; the recent-ban flag is left to expire
    pub async fn unban(&self, id: AccountId) -> DomainResult<()> {
        self.require_account(id).await?;
        self.users.set_active(id, true).await?;
        info!(account_id = id, "Account unbanned");
        Ok(())
    }

    pub async fn kick(&self, id: AccountId) -> DomainResult<()> {
        self.require_account(id).await?;
        self.revocation.kick(id).await?;
        info!(account_id = id, "Account kicked");
        Ok(())
    }

    pub async fn unkick(&self, id: AccountId) -> DomainResult<()> {
        self.require_account(id).await?;
        self.revocation.unkick(id).await?;
        info!(account_id = id, "Account unkicked");
        Ok(())
    }

    /// Invalidate every refresh token issued up to now
    ///
    /// The cutover is kept for one refresh-token lifetime; after that every
    /// token it could reject has expired on its own.
    pub async fn activate_mass_logout(&self) -> DomainResult<MassLogoutStatus> {
        let cutover = self
            .revocation
            .activate_mass_logout(self.lifetimes.refresh)
            .await?;
        Ok(MassLogoutStatus::active_since(to_datetime(cutover)?))
    }

    pub async fn deactivate_mass_logout(&self) -> DomainResult<()> {
        self.revocation.deactivate_mass_logout().await
    }

    pub async fn get_mass_logout_status(&self) -> DomainResult<MassLogoutStatus> {
        match self.revocation.get_mass_logout_cutover().await? {
            Some(cutover) => Ok(MassLogoutStatus::active_since(to_datetime(cutover)?)),
            None => Ok(MassLogoutStatus::default()),
        }
    }

    async fn require_account(&self, id: AccountId) -> DomainResult<Account> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound.into())
    }
}

fn to_datetime(timestamp: i64) -> DomainResult<DateTime<Utc>> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| DomainError::store(format!("cutover out of range: {}", timestamp)))
}
