//! Reader for PBKDF2-HMAC-SHA256 hashes imported from the previous system
//!
//! Format: `pbkdf2_sha256$<iterations>$<salt>$<base64 key>`, optionally with a
//! leading `$`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use sha2::Sha256;

use crate::errors::{DomainResult, PasswordError};

use super::PasswordVerifier;

const PBKDF2_SHA256: &str = "pbkdf2_sha256";

/// Derived key length, the SHA-256 output size
const DERIVED_KEY_LENGTH: usize = 32;

struct ParsedHash<'a> {
    iterations: u32,
    salt: &'a str,
    key: [u8; DERIVED_KEY_LENGTH],
}

fn parse(hash: &str) -> Result<ParsedHash<'_>, PasswordError> {
    let hash = hash.strip_prefix('$').unwrap_or(hash);
    let mut parts = hash.splitn(4, '$');

    let algorithm = parts.next().unwrap_or_default();
    if algorithm != PBKDF2_SHA256 {
        return Err(PasswordError::Unimplemented {
            strategy: "legacy-pbkdf2",
        });
    }

    let (iterations, salt, key) = match (parts.next(), parts.next(), parts.next()) {
        (Some(iterations), Some(salt), Some(key)) => (iterations, salt, key),
        _ => return Err(PasswordError::MalformedHash),
    };

    let iterations: u32 = iterations
        .parse()
        .map_err(|_| PasswordError::MalformedHash)?;
    if iterations == 0 {
        return Err(PasswordError::MalformedHash);
    }

    let key: [u8; DERIVED_KEY_LENGTH] = STANDARD
        .decode(key)
        .map_err(|_| PasswordError::MalformedHash)?
        .try_into()
        .map_err(|_| PasswordError::MalformedHash)?;

    Ok(ParsedHash {
        iterations,
        salt,
        key,
    })
}

/// Compare-only strategy for legacy PBKDF2 hashes
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyPbkdf2Verifier;

impl PasswordVerifier for LegacyPbkdf2Verifier {
    fn name(&self) -> &'static str {
        "legacy-pbkdf2"
    }

    fn hash(&self, _secret: &str) -> DomainResult<String> {
        Err(PasswordError::Unimplemented {
            strategy: self.name(),
        }
        .into())
    }

    fn compare(&self, hash: &str, secret: &str) -> DomainResult<()> {
        let parsed = parse(hash)?;

        let mut derived = [0u8; DERIVED_KEY_LENGTH];
        pbkdf2::pbkdf2_hmac::<Sha256>(
            secret.as_bytes(),
            parsed.salt.as_bytes(),
            parsed.iterations,
            &mut derived,
        );

        if constant_time_eq(&derived, &parsed.key) {
            Ok(())
        } else {
            Err(PasswordError::Mismatch.into())
        }
    }
}
