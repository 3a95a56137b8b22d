//! Mapping of domain errors onto HTTP responses
//!
//! Every failure leaving a route goes through [`classify`]. Authentication
//! failures of any kind (bad password, undecodable token, revoked session,
//! inactive account) share one body so a client cannot tell them apart;
//! the concrete cause is only logged.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{debug, error};

use fa_core::errors::{AuthError, DomainError};
use fa_shared::{error_codes, ErrorResponse};

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request deadline elapsed before the service answered
    #[error("Request deadline exceeded")]
    Timeout,

    /// A token cookie was not sent
    #[error("Missing {0} cookie")]
    MissingCookie(&'static str),

    /// An administrative target does not exist
    #[error("Account not found")]
    NotFound,

    /// Undecodable body or path parameter
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Error mapping for administration routes, where the target
    /// account is named by the caller and may be reported as missing
    pub fn admin(err: ApiError) -> ApiError {
        match err {
            ApiError::Domain(DomainError::Auth(AuthError::AccountNotFound)) => ApiError::NotFound,
            other => other,
        }
    }
}

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Status, error code and client-facing message for a domain error
pub fn classify(err: &DomainError) -> (StatusCode, &'static str, String) {
    match err {
        DomainError::Validation(v) => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, v.to_string())
        }
        DomainError::Auth(AuthError::InvalidCaptcha) => {
            (StatusCode::BAD_REQUEST, error_codes::CAPTCHA_INVALID, err.to_string())
        }
        DomainError::Auth(AuthError::DuplicateEmail | AuthError::DuplicateUsername) => {
            (StatusCode::CONFLICT, error_codes::CONFLICT, err.to_string())
        }
        DomainError::Auth(AuthError::InsufficientPermissions) => {
            (StatusCode::FORBIDDEN, error_codes::FORBIDDEN, err.to_string())
        }
        DomainError::StoreUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable".to_string(),
        ),
        DomainError::Internal { .. } => internal_error(),
        e if e.is_server_fault() => internal_error(),
        DomainError::Auth(_) | DomainError::Token(_) | DomainError::Password(_) => (
            StatusCode::UNAUTHORIZED,
            error_codes::UNAUTHORIZED,
            UNAUTHORIZED_MESSAGE.to_string(),
        ),
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "Internal server error".to_string(),
    )
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Domain(e) => classify(e),
            ApiError::Timeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                error_codes::TIMEOUT,
                self.to_string(),
            ),
            ApiError::MissingCookie(_) => (
                StatusCode::UNAUTHORIZED,
                error_codes::UNAUTHORIZED,
                UNAUTHORIZED_MESSAGE.to_string(),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, self.to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        } else {
            debug!(status = status.as_u16(), "Request rejected: {}", self);
        }

        let mut body = ErrorResponse::new(code, message);
        if let ApiError::Domain(DomainError::Validation(v)) = self {
            body = body.add_detail("field", v.field()).add_detail("reason", v.code());
        }

        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_core::errors::{PasswordError, RevocationReason, TokenError, ValidationError};

    #[test]
    fn test_auth_failures_share_one_shape() {
        let failures = [
            DomainError::Auth(AuthError::PasswordMismatch),
            DomainError::Auth(AuthError::AccountNotFound),
            DomainError::Auth(AuthError::AccountNotActive),
            DomainError::Auth(AuthError::NoPasswordSet),
            DomainError::Auth(AuthError::TokenDecodeFailed),
            DomainError::Auth(AuthError::SessionRevoked {
                reason: RevocationReason::Kicked,
            }),
            DomainError::Token(TokenError::MissingKeyId),
            DomainError::Password(PasswordError::Mismatch),
        ];

        for failure in failures {
            assert_eq!(
                classify(&failure),
                (
                    StatusCode::UNAUTHORIZED,
                    error_codes::UNAUTHORIZED,
                    UNAUTHORIZED_MESSAGE.to_string()
                ),
                "{:?}",
                failure
            );
        }
    }

    #[test]
    fn test_server_faults() {
        assert_eq!(
            classify(&DomainError::store("redis down")).0,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            classify(&DomainError::internal("boom")).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            classify(&DomainError::Password(PasswordError::HashFailed {
                message: "cost".to_string()
            }))
            .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            classify(&DomainError::Token(TokenError::EncodingFailed {
                message: "key".to_string()
            }))
            .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_message_is_not_leaked() {
        let (_, _, message) = classify(&DomainError::store("mysql://root:pw@db failed"));
        assert!(!message.contains("mysql"));
    }

    #[test]
    fn test_user_correctable_errors() {
        assert_eq!(
            classify(&DomainError::Validation(ValidationError::UsernameLength)).1,
            error_codes::VALIDATION_ERROR
        );
        assert_eq!(
            classify(&DomainError::Auth(AuthError::InvalidCaptcha)).1,
            error_codes::CAPTCHA_INVALID
        );
        assert_eq!(
            classify(&DomainError::Auth(AuthError::DuplicateUsername)).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            classify(&DomainError::Auth(AuthError::InsufficientPermissions)).0,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_admin_reports_missing_target() {
        let err = ApiError::admin(DomainError::Auth(AuthError::AccountNotFound).into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::admin(DomainError::Auth(AuthError::PasswordMismatch).into());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_timeout_is_unavailable() {
        assert_eq!(ApiError::Timeout.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::MissingCookie("access").status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
