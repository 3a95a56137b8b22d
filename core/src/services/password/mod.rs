//! Password strategies
//!
//! Every strategy hashes a secret for storage and compares a secret against a
//! stored hash. [`CompositeVerifier`] hashes with one strategy and compares
//! with an ordered list, which lets hashes imported from an older scheme keep
//! working until they are rewritten.

mod bcrypt;
mod composite;
mod legacy;
mod plaintext;

#[cfg(test)]
mod tests;

pub use self::bcrypt::BcryptVerifier;
pub use composite::{CompositeVerifier, PasswordMatch};
pub use legacy::LegacyPbkdf2Verifier;
pub use plaintext::PlaintextVerifier;

use crate::errors::DomainResult;

/// A password hashing algorithm
pub trait PasswordVerifier: Send + Sync {
    /// Short strategy name used in logs
    fn name(&self) -> &'static str;

    /// Hash `secret` for storage
    ///
    /// Fails only on inputs the algorithm cannot take; callers treat that as a
    /// server fault.
    fn hash(&self, secret: &str) -> DomainResult<String>;

    /// Compare `secret` against a stored `hash`
    ///
    /// `Ok(())` on match, `PasswordError::Mismatch` otherwise.
    fn compare(&self, hash: &str, secret: &str) -> DomainResult<()>;
}
