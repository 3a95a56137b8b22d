//! Session claims carried inside signed tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::account::{Account, AccountId};

/// Purpose of a signed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token presented on every request
    Access,
    /// Long-lived token exchanged for new access tokens
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity embedded in a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub id: AccountId,
    pub username: String,
    pub roles: Vec<String>,
}

impl From<&Account> for SessionPayload {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            roles: account.roles.clone(),
        }
    }
}

/// Decoded token payload
///
/// Field names are the wire claim names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
    /// Token purpose
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Account id
    pub id: AccountId,
    pub username: String,
    pub roles: Vec<String>,
}

impl SessionClaims {
    /// Build claims for `payload` issued at `now`
    pub fn new(payload: &SessionPayload, token_type: TokenType, now: i64, lifetime: i64) -> Self {
        Self {
            iat: now,
            exp: now + lifetime,
            token_type,
            id: payload.id,
            username: payload.username.clone(),
            roles: payload.roles.clone(),
        }
    }

    /// Identity part of the claims
    pub fn payload(&self) -> SessionPayload {
        SessionPayload {
            id: self.id,
            username: self.username.clone(),
            roles: self.roles.clone(),
        }
    }

    /// Whether the token has expired at `now`
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Check whether the claims carry a role tag
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
