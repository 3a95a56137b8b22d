use async_trait::async_trait;
use constant_time_eq::constant_time_eq;

use super::CaptchaVerifier;

/// Local verifier for development and tests
///
/// Accepts every proof unless an expected value is configured.
#[derive(Debug, Clone, Default)]
pub struct DebugCaptcha {
    expected: Option<String>,
}

impl DebugCaptcha {
    /// Accept every proof
    pub fn accept_all() -> Self {
        Self { expected: None }
    }

    /// Accept only `expected`
    pub fn expecting(expected: impl Into<String>) -> Self {
        Self {
            expected: Some(expected.into()),
        }
    }
}

#[async_trait]
impl CaptchaVerifier for DebugCaptcha {
    async fn is_valid(&self, proof: &str) -> bool {
        match &self.expected {
            None => true,
            Some(expected) => constant_time_eq(expected.as_bytes(), proof.as_bytes()),
        }
    }
}
