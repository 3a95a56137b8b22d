//! Token lifetimes

use fa_shared::JwtConfig;

/// How long issued tokens stay valid, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    /// Access token lifetime
    pub access: i64,
    /// Refresh token lifetime; also bounds kick and mass-logout facts
    pub refresh: i64,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: 60 * 60 * 6,
            refresh: 60 * 60 * 24 * 31,
        }
    }
}

impl From<&JwtConfig> for TokenLifetimes {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access: config.access_token_expiry,
            refresh: config.refresh_token_expiry,
        }
    }
}
