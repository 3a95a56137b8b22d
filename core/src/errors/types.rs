//! Error kinds raised by the credential engine
//!
//! Auth-class errors are safe to show a client only after the HTTP layer has
//! collapsed them into one response shape; the variants themselves carry the
//! detail for server-side logs.

use std::fmt;

use thiserror::Error;

/// Why a previously valid refresh token is no longer honored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationReason {
    /// Account was banned within the recent-ban window
    RecentlyBanned,
    /// Account was kicked by an administrator
    Kicked,
    /// Token predates the active mass-logout cutover
    MassLogout,
}

impl fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevocationReason::RecentlyBanned => write!(f, "recently banned"),
            RevocationReason::Kicked => write!(f, "kicked"),
            RevocationReason::MassLogout => write!(f, "mass logout"),
        }
    }
}

/// Authentication and session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid captcha")]
    InvalidCaptcha,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account is not active")]
    AccountNotActive,

    #[error("Account has no password set")]
    NoPasswordSet,

    #[error("Password mismatch")]
    PasswordMismatch,

    #[error("Token decoding failed")]
    TokenDecodeFailed,

    #[error("Session revoked: {reason}")]
    SessionRevoked { reason: RevocationReason },

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token header carries no key id")]
    MissingKeyId,

    #[error("Token key id is not trusted: {kid}")]
    UnknownKeyId { kid: String },

    #[error("Invalid token signature or format")]
    InvalidSignatureOrFormat,

    #[error("Unexpected token type: expected {expected}, got {actual}")]
    WrongTokenType { expected: String, actual: String },

    #[error("Failed to load key material: {message}")]
    KeyLoad { message: String },

    #[error("Token encoding failed: {message}")]
    EncodingFailed { message: String },
}

/// Password strategy errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password does not match")]
    Mismatch,

    #[error("Operation not supported by the {strategy} strategy")]
    Unimplemented { strategy: &'static str },

    #[error("Password hashing failed: {message}")]
    HashFailed { message: String },

    #[error("Malformed password hash")]
    MalformedHash,
}

/// Registration input errors, each tied to one form field
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email is empty")]
    EmailEmpty,

    #[error("Email must contain '@'")]
    EmailMissingSeparator,

    #[error("Email is too long")]
    EmailLength,

    #[error("Email is malformed")]
    EmailMalformed,

    #[error("Username is reserved")]
    UsernameForbidden,

    #[error("Username contains forbidden characters")]
    UsernameForbiddenChars,

    #[error("Username mixes latin and cyrillic letters")]
    UsernameMixedAlphabets,

    #[error("Username must be between 4 and 20 characters")]
    UsernameLength,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be between 6 and 32 characters")]
    PasswordLength,

    #[error("Password contains forbidden characters")]
    PasswordForbiddenChars,
}

impl ValidationError {
    /// Form field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmailEmpty
            | ValidationError::EmailMissingSeparator
            | ValidationError::EmailLength
            | ValidationError::EmailMalformed => "email",
            ValidationError::UsernameForbidden
            | ValidationError::UsernameForbiddenChars
            | ValidationError::UsernameMixedAlphabets
            | ValidationError::UsernameLength => "username",
            ValidationError::PasswordMismatch
            | ValidationError::PasswordLength
            | ValidationError::PasswordForbiddenChars => "password",
        }
    }

    /// Machine-readable reason
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmailEmpty => "EMAIL_EMPTY",
            ValidationError::EmailMissingSeparator => "EMAIL_MISSING_SEPARATOR",
            ValidationError::EmailLength => "EMAIL_LENGTH",
            ValidationError::EmailMalformed => "EMAIL_MALFORMED",
            ValidationError::UsernameForbidden => "USERNAME_FORBIDDEN",
            ValidationError::UsernameForbiddenChars => "USERNAME_FORBIDDEN_CHARS",
            ValidationError::UsernameMixedAlphabets => "USERNAME_MIXED_ALPHABETS",
            ValidationError::UsernameLength => "USERNAME_LENGTH",
            ValidationError::PasswordMismatch => "PASSWORD_MISMATCH",
            ValidationError::PasswordLength => "PASSWORD_LENGTH",
            ValidationError::PasswordForbiddenChars => "PASSWORD_FORBIDDEN_CHARS",
        }
    }
}
