//! Ed25519 key material for JWT signing and verification

use std::collections::HashSet;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, TokenError};

/// PKCS#8 v1 prefix wrapping a raw 32-byte Ed25519 seed
const ED25519_PKCS8_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04, 0x20,
];

const ED25519_KEY_LENGTH: usize = 32;
const ED25519_EXPANDED_KEY_LENGTH: usize = 64;

fn key_load_error(message: impl Into<String>) -> DomainError {
    DomainError::Token(TokenError::KeyLoad {
        message: message.into(),
    })
}

/// Public half of a key, trusted for verification under its kid
#[derive(Clone)]
pub struct VerificationKey {
    kid: String,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationKey").field("kid", &self.kid).finish()
    }
}

impl VerificationKey {
    /// Load an SPKI PEM-encoded public key
    pub fn from_pem(kid: impl Into<String>, public_key_pem: &[u8]) -> Result<Self, DomainError> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem)
            .map_err(|e| key_load_error(format!("Invalid public key format: {}", e)))?;
        Ok(Self {
            kid: kid.into(),
            decoding_key,
        })
    }

    /// Use a raw 32-byte public key
    pub fn from_raw(kid: impl Into<String>, public_key: &[u8]) -> Result<Self, DomainError> {
        if public_key.len() != ED25519_KEY_LENGTH {
            return Err(key_load_error(format!(
                "Raw public key must be {} bytes, got {}",
                ED25519_KEY_LENGTH,
                public_key.len()
            )));
        }
        Ok(Self {
            kid: kid.into(),
            decoding_key: DecodingKey::from_ed_der(public_key),
        })
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

/// Signing keypair identified by a kid
#[derive(Clone)]
pub struct KeyMaterial {
    encoding_key: EncodingKey,
    public: VerificationKey,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("kid", &self.public.kid)
            .finish()
    }
}

impl KeyMaterial {
    /// Load a keypair from PEM bytes (PKCS#8 private key, SPKI public key)
    ///
    /// # Returns
    ///
    /// * `Ok(KeyMaterial)` - Keys parsed and the pair verified against each other
    /// * `Err(DomainError)` - Invalid key format or mismatched pair
    pub fn from_pem(
        kid: impl Into<String>,
        private_key_pem: &[u8],
        public_key_pem: &[u8],
    ) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_ed_pem(private_key_pem)
            .map_err(|e| key_load_error(format!("Invalid private key format: {}", e)))?;
        let public = VerificationKey::from_pem(kid, public_key_pem)?;

        let material = Self {
            encoding_key,
            public,
        };
        material.check_pair()?;
        Ok(material)
    }

    /// Build a keypair from raw bytes and a raw 32-byte public key
    ///
    /// The private key is either the 32-byte seed or the 64-byte expanded
    /// form (seed followed by the public key). In the expanded form the
    /// trailing half must equal `public_key`.
    pub fn from_raw(
        kid: impl Into<String>,
        private_key: &[u8],
        public_key: &[u8],
    ) -> Result<Self, DomainError> {
        let private_seed = match private_key.len() {
            ED25519_KEY_LENGTH => private_key,
            ED25519_EXPANDED_KEY_LENGTH => {
                let (seed, embedded_public) = private_key.split_at(ED25519_KEY_LENGTH);
                if embedded_public != public_key {
                    return Err(key_load_error(
                        "Public half of the raw private key does not match the public key",
                    ));
                }
                seed
            }
            other => {
                return Err(key_load_error(format!(
                    "Raw private key must be {} or {} bytes, got {}",
                    ED25519_KEY_LENGTH, ED25519_EXPANDED_KEY_LENGTH, other
                )))
            }
        };

        let mut pkcs8 = Vec::with_capacity(ED25519_PKCS8_PREFIX.len() + ED25519_KEY_LENGTH);
        pkcs8.extend_from_slice(&ED25519_PKCS8_PREFIX);
        pkcs8.extend_from_slice(private_seed);

        let material = Self {
            encoding_key: EncodingKey::from_ed_der(&pkcs8),
            public: VerificationKey::from_raw(kid, public_key)?,
        };
        material.check_pair()?;
        Ok(material)
    }

    pub fn kid(&self) -> &str {
        self.public.kid()
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Public half of the pair
    pub fn verification_key(&self) -> &VerificationKey {
        &self.public
    }

    /// Sign a throwaway token and verify it with the public half
    fn check_pair(&self) -> Result<(), DomainError> {
        #[derive(Serialize, Deserialize)]
        struct PairCheck {
            check: bool,
        }

        let token = encode(
            &Header::new(Algorithm::EdDSA),
            &PairCheck { check: true },
            &self.encoding_key,
        )
        .map_err(|e| key_load_error(format!("Private key cannot sign: {}", e)))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        decode::<PairCheck>(&token, self.public.decoding_key(), &validation)
            .map(|_| ())
            .map_err(|_| key_load_error("Private and public keys do not form a pair"))
    }
}

/// The signing key plus every key trusted for verification
///
/// By default only the signing key's kid is trusted, so rotating the signing
/// key invalidates every token issued under the old one. Retired public keys
/// can be added to keep those tokens valid through a grace period.
#[derive(Debug, Clone)]
pub struct KeyRing {
    signing: KeyMaterial,
    retired: Vec<VerificationKey>,
}

impl KeyRing {
    /// Trust only `signing`
    pub fn new(signing: KeyMaterial) -> Self {
        Self {
            signing,
            retired: Vec::new(),
        }
    }

    /// Also trust a retired public key
    ///
    /// A retired key reusing the signing kid is ignored.
    pub fn with_retired(mut self, key: VerificationKey) -> Self {
        if key.kid() != self.signing.kid() && self.find(key.kid()).is_none() {
            self.retired.push(key);
        }
        self
    }

    pub fn signing(&self) -> &KeyMaterial {
        &self.signing
    }

    /// Key trusted under `kid`, if any
    pub fn find(&self, kid: &str) -> Option<&VerificationKey> {
        if self.signing.kid() == kid {
            return Some(self.signing.verification_key());
        }
        self.retired.iter().find(|k| k.kid() == kid)
    }

    /// Trusted kids, signing kid first
    pub fn trusted_kids(&self) -> Vec<&str> {
        std::iter::once(self.signing.kid())
            .chain(self.retired.iter().map(|k| k.kid()))
            .collect()
    }
}
