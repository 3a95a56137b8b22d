//! Authentication configuration: signing keys, token lifetimes, revocation,
//! password strategies and the humanness check

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// JWT signing configuration
///
/// Key material is read from PEM files at startup; the core never touches the
/// filesystem itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Path to the PKCS#8 PEM Ed25519 private key
    pub private_key_path: String,

    /// Path to the SPKI PEM Ed25519 public key
    pub public_key_path: String,

    /// Key identifier written to every token header
    pub kid: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Public key of the previous signing key, still trusted for verification
    #[serde(default)]
    pub retired_public_key_path: Option<String>,

    /// Key identifier of the previous signing key
    #[serde(default)]
    pub retired_kid: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from("keys/jwt_private_key.pem"),
            public_key_path: String::from("keys/jwt_public_key.pem"),
            kid: String::from("1"),
            access_token_expiry: 60 * 60 * 6,        // 6 hours
            refresh_token_expiry: 60 * 60 * 24 * 31, // 31 days
            retired_public_key_path: None,
            retired_kid: None,
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            private_key_path: env_or("JWT_PRIVATE_KEY_PATH", defaults.private_key_path),
            public_key_path: env_or("JWT_PUBLIC_KEY_PATH", defaults.public_key_path),
            kid: env_or("JWT_KID", defaults.kid),
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry),
            retired_public_key_path: env_opt("JWT_RETIRED_PUBLIC_KEY_PATH"),
            retired_kid: env_opt("JWT_RETIRED_KID"),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Both halves of the retired key are configured
    pub fn has_retired_key(&self) -> bool {
        self.retired_public_key_path.is_some() && self.retired_kid.is_some()
    }
}

/// Revocation fact lifetimes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Lifetime of the recent-ban compensating entry in seconds
    pub recent_ban_ttl: i64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            recent_ban_ttl: 600, // 10 minutes
        }
    }
}

impl RevocationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            recent_ban_ttl: env_or("REVOCATION_RECENT_BAN_TTL", Self::default().recent_ban_ttl),
        }
    }
}

/// Password strategy selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor for newly hashed passwords
    pub bcrypt_cost: u32,

    /// Accept hashes imported from the previous system's PBKDF2 scheme
    pub accept_legacy: bool,

    /// Store and compare passwords verbatim (tests only)
    #[serde(default)]
    pub plaintext: bool,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            accept_legacy: true,
            plaintext: false,
        }
    }
}

impl PasswordConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bcrypt_cost: env_or("PASSWORD_BCRYPT_COST", defaults.bcrypt_cost),
            accept_legacy: env_or("PASSWORD_ACCEPT_LEGACY", defaults.accept_legacy),
            plaintext: env_or("PASSWORD_PLAINTEXT", defaults.plaintext),
        }
    }
}

/// Humanness check configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CaptchaConfig {
    /// reCAPTCHA server-side secret; enables the Google verifier when set
    #[serde(default)]
    pub recaptcha_secret: Option<String>,

    /// Value the debug verifier accepts; `None` accepts everything
    #[serde(default)]
    pub debug_value: Option<String>,
}

impl CaptchaConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            recaptcha_secret: env_opt("RECAPTCHA_SECRET"),
            debug_value: env_opt("CAPTCHA_DEBUG_VALUE"),
        }
    }
}

/// Account granted the `admin` role at startup by the in-memory backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminSeedConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AdminSeedConfig {
    /// Create from environment variables; `None` unless all three are set
    pub fn from_env() -> Option<Self> {
        Some(Self {
            username: env_opt("ADMIN_SEED_USERNAME")?,
            email: env_opt("ADMIN_SEED_EMAIL")?,
            password: env_opt("ADMIN_SEED_PASSWORD")?,
        })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation configuration
    #[serde(default)]
    pub revocation: RevocationConfig,

    /// Password configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Captcha configuration
    #[serde(default)]
    pub captcha: CaptchaConfig,

    /// Seeded administrator for the in-memory backend
    #[serde(default)]
    pub admin_seed: Option<AdminSeedConfig>,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            revocation: RevocationConfig::from_env(),
            password: PasswordConfig::from_env(),
            captcha: CaptchaConfig::from_env(),
            admin_seed: AdminSeedConfig::from_env(),
        }
    }
}
