use fa_shared::{JwtConfig, RevocationConfig};

/// Lifetimes of per-account revocation facts, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevocationStoreConfig {
    /// Kick flag lifetime; matches the refresh token lifetime
    pub kick_ttl: i64,
    /// Recent-ban flag lifetime
    pub recent_ban_ttl: i64,
}

impl Default for RevocationStoreConfig {
    fn default() -> Self {
        Self {
            kick_ttl: 60 * 60 * 24 * 31,
            recent_ban_ttl: 600,
        }
    }
}

impl RevocationStoreConfig {
    pub fn from_config(revocation: &RevocationConfig, jwt: &JwtConfig) -> Self {
        Self {
            kick_ttl: jwt.refresh_token_expiry,
            recent_ban_ttl: revocation.recent_ban_ttl,
        }
    }
}
