//! In-process user directory for development and tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Account, AccountId, NewAccount, ADMIN_ROLE};
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

/// User directory backed by a map
///
/// Clones share the same accounts.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    next_id: Arc<AtomicI32>,
    failing: Arc<AtomicBool>,
}

impl InMemoryUserRepository {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Add a role tag to an account
    pub async fn grant_role(&self, id: AccountId, role: &str) -> Result<(), DomainError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or(AuthError::AccountNotFound)?;
        if !account.has_role(role) {
            account.roles.push(role.to_string());
        }
        Ok(())
    }

    /// Create `account` with the admin role, or grant the role to the
    /// account already holding its username
    pub async fn seed_admin(&self, account: NewAccount) -> Result<AccountId, DomainError> {
        let id = match self.find_by_username(&account.username).await? {
            Some(existing) => existing.id,
            None => self.create(account).await?,
        };
        self.grant_role(id, ADMIN_ROLE).await?;
        Ok(id)
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Whether the directory holds no accounts
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::store("in-memory directory is failing"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        self.check()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.check()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        self.check()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<AccountId, DomainError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::DuplicateEmail.into());
        }
        if accounts.values().any(|a| a.username == account.username) {
            return Err(AuthError::DuplicateUsername.into());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        accounts.insert(
            id,
            Account {
                id,
                email: account.email,
                username: account.username,
                password_hash: account.password_hash,
                roles: Vec::new(),
                active: true,
                verified: account.verified,
                created_at: now,
                last_login: now,
            },
        );
        Ok(id)
    }

    async fn update_last_login(&self, id: AccountId, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(&id) {
            account.last_login = at;
        }
        Ok(())
    }

    async fn set_password_hash(&self, id: AccountId, hash: &str) -> Result<(), DomainError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(&id) {
            account.password_hash = Some(hash.to_string());
        }
        Ok(())
    }

    async fn set_active(&self, id: AccountId, active: bool) -> Result<(), DomainError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(&id) {
            account.active = active;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.check()
    }
}
