// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation module.
//!
//! Validators collect every violation for a request into one error set;
//! a response never reports just the first offending field.

use crate::config::PasswordRequirements;
use gatekeeper_common::{FieldError, LoginRequest, RegisterRequest};
use regex::Regex;
use std::sync::LazyLock;

// Common validation constants
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 30;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

// Regex patterns for validation
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Lowercase and trim an email for lookup and storage. Uniqueness is
/// case-insensitive, so normalization must happen before both.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Collect username violations into `errors`.
fn check_username(username: &str, errors: &mut Vec<FieldError>) {
    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        errors.push(FieldError::new(
            "username",
            format!(
                "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
            ),
        ));
    }
    if !username.is_empty() && !USERNAME_REGEX.is_match(username) {
        errors.push(FieldError::new(
            "username",
            "Username must contain only alphanumeric characters",
        ));
    }
}

/// Collect email violations into `errors`.
fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email address cannot be empty"));
        return;
    }
    if email.len() > MAX_EMAIL_LENGTH {
        errors.push(FieldError::new(
            "email",
            format!("Email address cannot exceed {MAX_EMAIL_LENGTH} characters"),
        ));
    }
    if !EMAIL_REGEX.is_match(email) {
        errors.push(FieldError::new("email", "Invalid email address format"));
    }
}

/// Collect password-complexity violations into `errors`, one entry per
/// failed rule.
fn check_password(password: &str, requirements: &PasswordRequirements, errors: &mut Vec<FieldError>) {
    if password.len() < requirements.min_length {
        errors.push(FieldError::new(
            "password",
            format!(
                "Password must be at least {} characters",
                requirements.min_length
            ),
        ));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!("Password cannot exceed {MAX_PASSWORD_LENGTH} characters"),
        ));
    }
    if requirements.require_lowercase && !password.chars().any(char::is_lowercase) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one lowercase letter",
        ));
    }
    if requirements.require_uppercase && !password.chars().any(char::is_uppercase) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one uppercase letter",
        ));
    }
    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one number",
        ));
    }
    if requirements.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one special character",
        ));
    }
}

/// Validate a registration request. No store access happens before this
/// passes.
pub fn validate_registration(
    req: &RegisterRequest,
    requirements: &PasswordRequirements,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_username(&req.username, &mut errors);
    check_email(req.email.trim(), &mut errors);
    check_password(&req.password, requirements, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a login request: well-formed email and minimum password length.
/// Complexity rules are a registration concern only.
pub fn validate_login(req: &LoginRequest, min_password: usize) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_email(req.email.trim(), &mut errors);
    if req.password.len() < min_password {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {min_password} characters"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
