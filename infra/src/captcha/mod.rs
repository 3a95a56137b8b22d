//! Humanness verification against external providers

mod recaptcha;

pub use recaptcha::{ReCaptchaVerifier, RECAPTCHA_VERIFY_URL};
