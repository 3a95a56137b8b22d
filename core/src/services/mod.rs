//! Business services containing domain logic and use cases.

pub mod admin;
pub mod auth;
pub mod captcha;
pub mod password;
pub mod revocation;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use admin::AdministrationService;
pub use auth::CredentialService;
pub use captcha::{CaptchaVerifier, DebugCaptcha};
pub use password::{
    BcryptVerifier, CompositeVerifier, LegacyPbkdf2Verifier, PasswordMatch, PasswordVerifier,
    PlaintextVerifier,
};
pub use revocation::{RevocationStore, RevocationStoreConfig};
pub use token::{JwtTokenCodec, KeyMaterial, KeyRing, TokenCodec, TokenLifetimes, VerificationKey};
