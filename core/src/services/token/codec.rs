//! Signed session token codec

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};
use tracing::debug;

use crate::clock::Clock;
use crate::domain::entities::{SessionClaims, SessionPayload, TokenType};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::key_manager::KeyRing;

/// Encodes and decodes signed session claims
///
/// Implementations are pure given their key material and clock, so a single
/// instance can be shared across any number of concurrent requests.
pub trait TokenCodec: Send + Sync {
    /// Sign `payload` as a `token_type` token valid for `lifetime` seconds
    fn encode(
        &self,
        payload: &SessionPayload,
        lifetime: i64,
        token_type: TokenType,
    ) -> DomainResult<String>;

    /// Verify `token` and return its claims
    ///
    /// # Errors
    ///
    /// * `TokenError::MissingKeyId` - header has no kid
    /// * `TokenError::UnknownKeyId` - kid is not trusted
    /// * `TokenError::InvalidSignatureOrFormat` - bad signature, bad structure or expired
    /// * `TokenError::WrongTokenType` - claims carry a different token type
    fn decode(&self, token: &str, expected: TokenType) -> DomainResult<SessionClaims>;
}

/// EdDSA JWT codec
pub struct JwtTokenCodec {
    keys: KeyRing,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl JwtTokenCodec {
    pub fn new(keys: KeyRing, clock: Arc<dyn Clock>) -> Self {
        // Expiry is checked against the injected clock after decoding
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            keys,
            clock,
            validation,
        }
    }

    pub fn keys(&self) -> &KeyRing {
        &self.keys
    }
}

impl TokenCodec for JwtTokenCodec {
    fn encode(
        &self,
        payload: &SessionPayload,
        lifetime: i64,
        token_type: TokenType,
    ) -> DomainResult<String> {
        let signing = self.keys.signing();

        let mut header = Header::new(Algorithm::EdDSA);
        header.kid = Some(signing.kid().to_string());

        let claims = SessionClaims::new(payload, token_type, self.clock.now(), lifetime);

        encode(&header, &claims, signing.encoding_key()).map_err(|e| {
            DomainError::Token(TokenError::EncodingFailed {
                message: e.to_string(),
            })
        })
    }

    fn decode(&self, token: &str, expected: TokenType) -> DomainResult<SessionClaims> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Malformed token header");
            TokenError::InvalidSignatureOrFormat
        })?;

        let kid = header.kid.ok_or(TokenError::MissingKeyId)?;
        let key = self
            .keys
            .find(&kid)
            .ok_or_else(|| TokenError::UnknownKeyId { kid: kid.clone() })?;

        let data = decode::<SessionClaims>(token, key.decoding_key(), &self.validation)
            .map_err(|e| {
                debug!(error = %e, kid = %kid, "Token verification failed");
                TokenError::InvalidSignatureOrFormat
            })?;
        let claims = data.claims;

        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::InvalidSignatureOrFormat.into());
        }

        if claims.token_type != expected {
            return Err(TokenError::WrongTokenType {
                expected: expected.to_string(),
                actual: claims.token_type.to_string(),
            }
            .into());
        }

        Ok(claims)
    }
}
