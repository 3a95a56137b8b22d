//! Google reCAPTCHA verification
//!
//! The proof submitted with a form is posted to the siteverify endpoint as
//! `application/x-www-form-urlencoded` together with the server secret.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

use fa_core::services::CaptchaVerifier;

use crate::InfrastructureError;

pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
pub(crate) struct SiteVerifyResponse {
    pub success: bool,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

/// reCAPTCHA client; any transport or decoding failure counts as invalid
#[derive(Clone)]
pub struct ReCaptchaVerifier {
    client: reqwest::Client,
    secret: String,
    verify_url: String,
}

impl std::fmt::Debug for ReCaptchaVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReCaptchaVerifier")
            .field("verify_url", &self.verify_url)
            .finish_non_exhaustive()
    }
}

impl ReCaptchaVerifier {
    pub fn new(secret: impl Into<String>) -> Result<Self, InfrastructureError> {
        Self::with_url(secret, RECAPTCHA_VERIFY_URL)
    }

    /// Verify against a different endpoint
    pub fn with_url(
        secret: impl Into<String>,
        verify_url: impl Into<String>,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            secret: secret.into(),
            verify_url: verify_url.into(),
        })
    }

    async fn site_verify(&self, proof: &str) -> Result<SiteVerifyResponse, InfrastructureError> {
        let response = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", proof)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<SiteVerifyResponse>().await?)
    }
}

#[async_trait]
impl CaptchaVerifier for ReCaptchaVerifier {
    async fn is_valid(&self, proof: &str) -> bool {
        if proof.is_empty() {
            return false;
        }

        match self.site_verify(proof).await {
            Ok(response) if response.success => true,
            Ok(response) => {
                debug!(error_codes = ?response.error_codes, "reCAPTCHA rejected proof");
                false
            }
            Err(InfrastructureError::Http(e)) if e.is_timeout() => {
                warn!("reCAPTCHA request timed out");
                false
            }
            Err(e) => {
                error!("Failed to send reCAPTCHA request: {}", e);
                false
            }
        }
    }
}
