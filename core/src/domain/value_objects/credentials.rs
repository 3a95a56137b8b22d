//! Registration and login requests.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w\-\.]+@([\w-]+\.)+[\w-]{2,6}$").expect("email pattern is valid")
});

const MAX_EMAIL_LOCAL_PART: usize = 64;
const MAX_EMAIL_DOMAIN_PART: usize = 255;

const FORBIDDEN_USERNAMES: [&str; 2] = ["admin", "moderator"];
const USERNAME_MIN_LENGTH: usize = 4;
const USERNAME_MAX_LENGTH: usize = 20;

const PASSWORD_MIN_LENGTH: usize = 6;
const PASSWORD_MAX_LENGTH: usize = 32;

/// Self-service registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password1: String,
    pub password2: String,
    /// Humanness proof
    #[serde(default)]
    pub captcha: String,
}

impl RegisterRequest {
    /// Validate the form, trimming email and username in place
    ///
    /// Fields are checked in form order and the first failure is returned.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.email = validate_email(&self.email)?;
        self.username = validate_username(&self.username)?;
        validate_password(&self.password1, &self.password2)?;
        Ok(())
    }
}

/// Password login form; `login` is an email or a username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or(ValidationError::EmailMissingSeparator)?;

    if local.len() > MAX_EMAIL_LOCAL_PART || domain.len() > MAX_EMAIL_DOMAIN_PART {
        return Err(ValidationError::EmailLength);
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::EmailMalformed);
    }

    Ok(email.to_string())
}

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_cyrillic_letter(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

fn validate_username(username: &str) -> Result<String, ValidationError> {
    let username = username.trim();

    let lowered = username.to_lowercase();
    if FORBIDDEN_USERNAMES.contains(&lowered.as_str()) {
        return Err(ValidationError::UsernameForbidden);
    }

    let mut has_latin = false;
    let mut has_cyrillic = false;
    for c in username.chars() {
        if is_latin_letter(c) {
            has_latin = true;
        } else if is_cyrillic_letter(c) {
            has_cyrillic = true;
        } else {
            return Err(ValidationError::UsernameForbiddenChars);
        }
    }

    if has_latin && has_cyrillic {
        return Err(ValidationError::UsernameMixedAlphabets);
    }

    let length = username.chars().count();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        return Err(ValidationError::UsernameLength);
    }

    Ok(username.to_string())
}

fn validate_password(password1: &str, password2: &str) -> Result<(), ValidationError> {
    if password1 != password2 {
        return Err(ValidationError::PasswordMismatch);
    }

    let length = password1.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        return Err(ValidationError::PasswordLength);
    }

    // Printable ASCII, space included
    if !password1.chars().all(|c| (' '..='~').contains(&c)) {
        return Err(ValidationError::PasswordForbiddenChars);
    }

    Ok(())
}
