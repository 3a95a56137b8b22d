//! Account entity as held by the user directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric account identifier
pub type AccountId = i32;

/// Role tag granting access to administration endpoints
pub const ADMIN_ROLE: &str = "admin";

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Email address, unique across accounts
    pub email: String,

    /// Username, unique across accounts
    pub username: String,

    /// Stored password hash; `None` for accounts without an interactive
    /// login credential
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Role tags in assignment order
    pub roles: Vec<String>,

    /// `false` means banned
    pub active: bool,

    /// Whether the email address has been confirmed
    pub verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last successful login
    pub last_login: DateTime<Utc>,
}

impl Account {
    /// Check whether the account carries a role tag
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check whether the account can log in with a password
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data needed to create an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub verified: bool,
}
