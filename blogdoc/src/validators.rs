use email_address::EmailAddress;

use crate::errors::{ValidationError, ValidationIssue};

/// Returns `true` if the provided string is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EmailAddress::is_valid(value)
}

/// Trims `value` and rejects it when nothing is left.
pub fn required_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::single(field, "required", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Usernames are a single token: no whitespace, at most 32 characters.
pub fn username_issue(value: &str) -> Option<ValidationIssue> {
    if value.is_empty() {
        Some(ValidationIssue::new("username", "required", "must not be empty"))
    } else if value.chars().any(char::is_whitespace) {
        Some(ValidationIssue::new("username", "format", "must not contain whitespace"))
    } else if value.chars().count() > 32 {
        Some(ValidationIssue::new("username", "length", "must be at most 32 characters"))
    } else {
        None
    }
}
