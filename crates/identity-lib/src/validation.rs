// ============================
// crates/identity-lib/src/validation.rs
// ============================
//! Input format validation for callers of the credential service.
//!
//! The service assumes these checks already ran (an API layer runs them on
//! its request DTOs); nothing here is consulted on the hot path.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::config::PasswordRequirements;

// Common validation constants
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_DISPLAY_NAME_LENGTH: usize = 100;
const MAX_IDENTIFIER_LENGTH: usize = 254; // RFC 5321 SMTP limit

// Regex patterns for validation
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static DISPLAY_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^<>/\\{}()\[\];]*$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a login identifier (email shape)
pub fn validate_identifier(identifier: &str) -> ValidationResult<&str> {
    if identifier.is_empty() {
        return Err(ValidationError::InvalidIdentifier(
            "Identifier must not be empty".to_string(),
        ));
    }

    if identifier.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::InvalidIdentifier(format!(
            "Identifier cannot exceed {MAX_IDENTIFIER_LENGTH} characters"
        )));
    }

    if !IDENTIFIER_REGEX.is_match(identifier) {
        return Err(ValidationError::InvalidIdentifier(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(identifier)
}

/// Validate a password against a complexity policy
pub fn validate_password<'a>(
    password: &'a str,
    requirements: &PasswordRequirements,
) -> ValidationResult<&'a str> {
    if password.len() < requirements.min_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {} characters",
            requirements.min_length
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    if requirements.require_uppercase && !password.chars().any(char::is_uppercase) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if requirements.require_lowercase && !password.chars().any(char::is_lowercase) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one number".to_string(),
        ));
    }

    if requirements.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one special character".to_string(),
        ));
    }

    Ok(password)
}

/// Validate a display name
pub fn validate_display_name(display_name: &str) -> ValidationResult<&str> {
    if display_name.is_empty() {
        return Err(ValidationError::InvalidDisplayName(
            "Display name must not be empty".to_string(),
        ));
    }

    if display_name.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err(ValidationError::InvalidDisplayName(format!(
            "Display name must be between 1 and {MAX_DISPLAY_NAME_LENGTH} characters"
        )));
    }

    // Check for potentially dangerous characters
    if !DISPLAY_NAME_REGEX.is_match(display_name) {
        return Err(ValidationError::InvalidDisplayName(
            "Display name contains invalid characters".to_string(),
        ));
    }

    Ok(display_name)
}
