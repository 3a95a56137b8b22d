//! Humanness check used at registration

mod debug;

pub use debug::DebugCaptcha;

use async_trait::async_trait;

/// Verifies a humanness proof submitted with a form
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `false` for a rejected proof and for any failure reaching the verifier
    async fn is_valid(&self, proof: &str) -> bool;
}
