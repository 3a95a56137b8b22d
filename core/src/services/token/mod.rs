//! Token module for signed session credentials
//!
//! This module handles:
//! - Ed25519 key material loaded from PEM or raw bytes
//! - The key ring deciding which kids are trusted
//! - EdDSA JWT encoding and verification of session claims

mod codec;
mod config;
mod key_manager;

#[cfg(test)]
mod tests;

pub use codec::{JwtTokenCodec, TokenCodec};
pub use config::TokenLifetimes;
pub use key_manager::{KeyMaterial, KeyRing, VerificationKey};
