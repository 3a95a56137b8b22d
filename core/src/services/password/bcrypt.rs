use crate::errors::{DomainResult, PasswordError};

use super::PasswordVerifier;

/// Longest secret bcrypt hashes without truncation
const BCRYPT_MAX_SECRET_BYTES: usize = 72;

/// Adaptive bcrypt hashing, the production default
#[derive(Debug, Clone, Copy)]
pub struct BcryptVerifier {
    cost: u32,
}

impl BcryptVerifier {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptVerifier {
    fn default() -> Self {
        Self::new(::bcrypt::DEFAULT_COST)
    }
}

impl PasswordVerifier for BcryptVerifier {
    fn name(&self) -> &'static str {
        "bcrypt"
    }

    fn hash(&self, secret: &str) -> DomainResult<String> {
        if secret.len() > BCRYPT_MAX_SECRET_BYTES {
            return Err(PasswordError::HashFailed {
                message: format!("secret exceeds {} bytes", BCRYPT_MAX_SECRET_BYTES),
            }
            .into());
        }

        ::bcrypt::hash(secret, self.cost).map_err(|e| {
            PasswordError::HashFailed {
                message: e.to_string(),
            }
            .into()
        })
    }

    fn compare(&self, hash: &str, secret: &str) -> DomainResult<()> {
        match ::bcrypt::verify(secret, hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PasswordError::Mismatch.into()),
            Err(_) => Err(PasswordError::MalformedHash.into()),
        }
    }
}
