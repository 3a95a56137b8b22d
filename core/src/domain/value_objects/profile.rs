//! Read models returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Account, AccountId};

/// Public profile of the calling account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Me {
    pub id: AccountId,
    pub email: String,
    pub username: String,
    pub verified: bool,
}

impl From<&Account> for Me {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            username: account.username.clone(),
            verified: account.verified,
        }
    }
}

/// Whether a mass logout is in effect and since when
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MassLogoutStatus {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

impl MassLogoutStatus {
    /// Status for an active cutover at `since`
    pub fn active_since(since: DateTime<Utc>) -> Self {
        Self {
            active: true,
            since: Some(since),
        }
    }
}
