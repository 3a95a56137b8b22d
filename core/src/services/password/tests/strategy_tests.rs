//! Tests for password strategies

use std::sync::Arc;

use fa_shared::PasswordConfig;

use crate::errors::{DomainError, PasswordError};
use crate::services::password::{
    BcryptVerifier, CompositeVerifier, LegacyPbkdf2Verifier, PasswordVerifier, PlaintextVerifier,
};

/// PBKDF2-HMAC-SHA256 of "secret1", salt "Zl1kPq9sRt", 1000 iterations
const LEGACY_HASH: &str = "pbkdf2_sha256$1000$Zl1kPq9sRt$6r6V4D+DZ7FbfWfEGh0RP2NNHC+jo1OkrCXrD+z70cY=";

// Lowest cost bcrypt accepts; keeps the suite fast
const TEST_COST: u32 = 4;

fn password_error(result: Result<impl std::fmt::Debug, DomainError>) -> PasswordError {
    match result {
        Err(DomainError::Password(e)) => e,
        other => panic!("expected password error, got {:?}", other),
    }
}

#[test]
fn test_bcrypt_hash_and_compare() {
    let bcrypt = BcryptVerifier::new(TEST_COST);
    let hash = bcrypt.hash("secret1").unwrap();

    assert!(hash.starts_with("$2"));
    assert!(bcrypt.compare(&hash, "secret1").is_ok());
    assert_eq!(password_error(bcrypt.compare(&hash, "wrong")), PasswordError::Mismatch);
}

#[test]
fn test_bcrypt_rejects_overlong_secret() {
    let bcrypt = BcryptVerifier::new(TEST_COST);
    assert!(matches!(
        password_error(bcrypt.hash(&"x".repeat(73))),
        PasswordError::HashFailed { .. }
    ));
    assert!(bcrypt.hash(&"x".repeat(72)).is_ok());
}

#[test]
fn test_bcrypt_rejects_invalid_cost() {
    let bcrypt = BcryptVerifier::new(99);
    assert!(matches!(
        password_error(bcrypt.hash("secret1")),
        PasswordError::HashFailed { .. }
    ));
}

#[test]
fn test_plaintext_compare() {
    let plaintext = PlaintextVerifier;
    assert_eq!(plaintext.hash("secret1").unwrap(), "secret1");
    assert!(plaintext.compare("secret1", "secret1").is_ok());
    assert_eq!(password_error(plaintext.compare("secret1", "secret")), PasswordError::Mismatch);
}

#[test]
fn test_legacy_compare() {
    let legacy = LegacyPbkdf2Verifier;

    assert!(legacy.compare(LEGACY_HASH, "secret1").is_ok());
    assert!(legacy.compare(&format!("${}", LEGACY_HASH), "secret1").is_ok());
    assert_eq!(password_error(legacy.compare(LEGACY_HASH, "secret2")), PasswordError::Mismatch);
}

#[test]
fn test_legacy_does_not_hash() {
    assert!(matches!(
        password_error(LegacyPbkdf2Verifier.hash("secret1")),
        PasswordError::Unimplemented { .. }
    ));
}

#[test]
fn test_legacy_rejects_malformed_hashes() {
    let legacy = LegacyPbkdf2Verifier;

    assert!(matches!(
        password_error(legacy.compare("argon2$1$salt$key", "secret1")),
        PasswordError::Unimplemented { .. }
    ));
    assert_eq!(password_error(legacy.compare("pbkdf2_sha256$1000$salt", "x")), PasswordError::MalformedHash);
    assert_eq!(password_error(legacy.compare("pbkdf2_sha256$many$salt$a2V5", "x")), PasswordError::MalformedHash);
    assert_eq!(password_error(legacy.compare("pbkdf2_sha256$0$salt$a2V5", "x")), PasswordError::MalformedHash);
    assert_eq!(password_error(legacy.compare("pbkdf2_sha256$10$salt$!!!", "x")), PasswordError::MalformedHash);
}

#[test]
fn test_legacy_rejects_truncated_key() {
    let legacy = LegacyPbkdf2Verifier;

    // Leading bytes of PBKDF2("secret1"), so a short derive would match
    for truncated in [
        "pbkdf2_sha256$1000$Zl1kPq9sRt$6g==",
        "pbkdf2_sha256$1000$Zl1kPq9sRt$6r6V4D+DZ7FbfWfEGh0RP2NNHC+jo1OkrCXrD+z70Q==",
    ] {
        assert_eq!(password_error(legacy.compare(truncated, "secret1")), PasswordError::MalformedHash);
        assert_eq!(password_error(legacy.compare(truncated, "wrong115")), PasswordError::MalformedHash);
    }
}

#[test]
fn test_migration_through_composite() {
    let bcrypt = BcryptVerifier::new(TEST_COST);
    let composite = CompositeVerifier::new(Arc::new(bcrypt)).with_comparer(Arc::new(LegacyPbkdf2Verifier));

    assert!(LegacyPbkdf2Verifier.compare(LEGACY_HASH, "secret1").is_ok());
    assert!(bcrypt.compare(LEGACY_HASH, "secret1").is_err());

    let matched = composite.verify(LEGACY_HASH, "secret1").unwrap();
    assert_eq!(matched.strategy, "legacy-pbkdf2");
    assert!(matched.needs_rehash);

    let fresh = composite.hash("secret1").unwrap();
    let matched = composite.verify(&fresh, "secret1").unwrap();
    assert_eq!(matched.strategy, "bcrypt");
    assert!(!matched.needs_rehash);

    assert_eq!(password_error(composite.compare(LEGACY_HASH, "wrong")), PasswordError::Mismatch);
}

#[test]
fn test_composite_from_config() {
    let config = PasswordConfig {
        bcrypt_cost: TEST_COST,
        accept_legacy: true,
        plaintext: false,
    };
    assert_eq!(CompositeVerifier::from_config(&config).comparer_names(), vec!["bcrypt", "legacy-pbkdf2"]);

    let config = PasswordConfig {
        bcrypt_cost: TEST_COST,
        accept_legacy: false,
        plaintext: true,
    };
    let composite = CompositeVerifier::from_config(&config);
    assert_eq!(composite.comparer_names(), vec!["plaintext"]);
    assert!(composite.compare(LEGACY_HASH, "secret1").is_err());
}
