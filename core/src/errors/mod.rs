//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, PasswordError, RevocationReason, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Cache or directory I/O failed; never to be read as "not revoked"
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Shorthand for a store failure
    pub fn store(message: impl Into<String>) -> Self {
        DomainError::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Shorthand for an internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Server fault rather than a client or authentication failure
    pub fn is_server_fault(&self) -> bool {
        match self {
            DomainError::StoreUnavailable { .. } | DomainError::Internal { .. } => true,
            DomainError::Token(TokenError::KeyLoad { .. })
            | DomainError::Token(TokenError::EncodingFailed { .. }) => true,
            DomainError::Password(PasswordError::HashFailed { .. }) => true,
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
