use constant_time_eq::constant_time_eq;

use crate::errors::{DomainResult, PasswordError};

use super::PasswordVerifier;

/// Stores secrets verbatim
///
/// Test double only; never enable it against real accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl PasswordVerifier for PlaintextVerifier {
    fn name(&self) -> &'static str {
        "plaintext"
    }

    fn hash(&self, secret: &str) -> DomainResult<String> {
        Ok(secret.to_string())
    }

    fn compare(&self, hash: &str, secret: &str) -> DomainResult<()> {
        if constant_time_eq(hash.as_bytes(), secret.as_bytes()) {
            Ok(())
        } else {
            Err(PasswordError::Mismatch.into())
        }
    }
}
