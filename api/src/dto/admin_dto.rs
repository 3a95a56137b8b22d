use serde::{Deserialize, Serialize};

use fa_core::domain::entities::AccountId;

/// `{id}` segment of `/admin/users/{id}/...`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AccountPath {
    pub id: AccountId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionResponse {
    pub id: AccountId,
    pub action: String,
}

impl AdminActionResponse {
    pub fn new(id: AccountId, action: &str) -> Self {
        Self {
            id,
            action: action.to_string(),
        }
    }
}
