// ABOUTME: Input validation primitives shared by resource schemas
// ABOUTME: Field-level checks that run before any statement reaches MindsDB

use thiserror::Error;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// Reject empty or whitespace-only values
pub fn require_non_blank(field: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    Ok(())
}

/// Character-count bounds on the trimmed value
pub fn require_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(ValidationError::new(
            field,
            format!(
                "must be between {} and {} characters (got {})",
                min, max, len
            ),
        ));
    }
    Ok(())
}

/// Inclusive numeric range check
pub fn require_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult {
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {} and {} (got {})", min, max, value),
        ));
    }
    Ok(())
}

/// Every list item must be a non-blank string
pub fn require_items_non_blank(field: &str, items: &[String]) -> ValidationResult {
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(ValidationError::new(field, "all items must be non-empty strings"));
    }
    Ok(())
}

/// Reject values containing any uppercase character
pub fn require_lowercase(field: &str, value: &str) -> ValidationResult {
    if value.chars().any(char::is_uppercase) {
        return Err(ValidationError::new(field, "must be lowercase"));
    }
    Ok(())
}

/// Strict check for names interpolated unquoted into statements: only
/// lowercase ASCII letters, digits and underscores are accepted
pub fn require_identifier(field: &str, id: &str) -> ValidationResult {
    if id.is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ValidationError::new(
            field,
            format!(
                "'{}' may only contain lowercase ASCII letters, digits and underscores",
                id
            ),
        ));
    }
    Ok(())
}
