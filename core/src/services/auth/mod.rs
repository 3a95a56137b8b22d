//! Credential service module
//!
//! This module provides the account-facing flows:
//! - Registration with form validation and a humanness check
//! - Password login by email or username
//! - Access token introspection and role checks
//! - Refresh against the revocation facts

mod service;

#[cfg(test)]
mod tests;

pub use service::CredentialService;
