//! User directory trait defining the interface for account persistence.
//!
//! The directory is owned by an external store; the credential engine only
//! reads accounts, creates them at registration and flips the `active` flag.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Account, AccountId, NewAccount};
use crate::errors::DomainError;

/// Repository trait for account persistence operations
///
/// Every method returns `Ok(None)` / `Ok(false)` for "not found" and reserves
/// `Err(DomainError::StoreUnavailable)` for genuine I/O failures.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its identifier
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    /// Find an account by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by username
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Resolve a login identifier
    ///
    /// An identifier containing `@` is looked up as an email first and falls
    /// back to a username lookup when no email matches.
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError> {
        if login.contains('@') {
            if let Some(account) = self.find_by_email(login).await? {
                return Ok(Some(account));
            }
        }
        self.find_by_username(login).await
    }

    /// Create an account and return its identifier
    ///
    /// # Returns
    /// * `Ok(id)` - Account created
    /// * `Err(DomainError::Auth(DuplicateEmail | DuplicateUsername))` - Uniqueness violated
    /// * `Err(DomainError::StoreUnavailable)` - Store failure
    async fn create(&self, account: NewAccount) -> Result<AccountId, DomainError>;

    /// Record a successful login
    async fn update_last_login(&self, id: AccountId, at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Replace the stored password hash
    async fn set_password_hash(&self, id: AccountId, hash: &str) -> Result<(), DomainError>;

    /// Set the `active` flag; `false` bans the account
    async fn set_active(&self, id: AccountId, active: bool) -> Result<(), DomainError>;

    /// Check that the store answers
    async fn ping(&self) -> Result<(), DomainError>;
}
