use std::sync::Arc;

use fa_shared::PasswordConfig;
use tracing::debug;

use crate::errors::{DomainResult, PasswordError};

use super::{BcryptVerifier, LegacyPbkdf2Verifier, PasswordVerifier, PlaintextVerifier};

/// Which comparer accepted a secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordMatch {
    /// Name of the matching strategy
    pub strategy: &'static str,
    /// The hash was not produced by the current hasher
    pub needs_rehash: bool,
}

/// Hashes with one strategy and compares with an ordered list
pub struct CompositeVerifier {
    hasher: Arc<dyn PasswordVerifier>,
    comparers: Vec<Arc<dyn PasswordVerifier>>,
}

impl CompositeVerifier {
    /// Hash and compare with `hasher` only
    pub fn new(hasher: Arc<dyn PasswordVerifier>) -> Self {
        Self {
            comparers: vec![hasher.clone()],
            hasher,
        }
    }

    /// Also accept hashes produced by `comparer`, tried after those added before it
    pub fn with_comparer(mut self, comparer: Arc<dyn PasswordVerifier>) -> Self {
        self.comparers.push(comparer);
        self
    }

    /// Build the strategy set described by `config`
    pub fn from_config(config: &PasswordConfig) -> Self {
        let hasher: Arc<dyn PasswordVerifier> = if config.plaintext {
            Arc::new(PlaintextVerifier)
        } else {
            Arc::new(BcryptVerifier::new(config.bcrypt_cost))
        };

        let composite = Self::new(hasher);
        if config.accept_legacy {
            composite.with_comparer(Arc::new(LegacyPbkdf2Verifier))
        } else {
            composite
        }
    }

    /// Strategy names in comparison order
    pub fn comparer_names(&self) -> Vec<&'static str> {
        self.comparers.iter().map(|c| c.name()).collect()
    }

    /// Compare and report which strategy matched
    pub fn verify(&self, hash: &str, secret: &str) -> DomainResult<PasswordMatch> {
        for (position, comparer) in self.comparers.iter().enumerate() {
            match comparer.compare(hash, secret) {
                Ok(()) => {
                    return Ok(PasswordMatch {
                        strategy: comparer.name(),
                        needs_rehash: position != 0,
                    })
                }
                Err(e) => debug!(strategy = comparer.name(), error = %e, "Comparer rejected secret"),
            }
        }
        Err(PasswordError::Mismatch.into())
    }
}

impl PasswordVerifier for CompositeVerifier {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn hash(&self, secret: &str) -> DomainResult<String> {
        self.hasher.hash(secret)
    }

    fn compare(&self, hash: &str, secret: &str) -> DomainResult<()> {
        self.verify(hash, secret).map(|_| ())
    }
}
