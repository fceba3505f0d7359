//! Small request-validation helpers shared by handlers.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length accepted for titles and names.
pub const MAX_TITLE_LEN: usize = 200;

/// Reject a syntactically invalid email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Reject an empty (or whitespace-only) required string field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject a title that is empty or longer than [`MAX_TITLE_LEN`].
pub fn validate_title(field: &str, value: &str) -> Result<(), CoreError> {
    require_non_empty(field, value)?;
    if value.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Reject negative optional numeric metadata (width, height, size, ...).
pub fn validate_non_negative(field: &str, value: Option<i64>) -> Result<(), CoreError> {
    if value.is_some_and(|v| v < 0) {
        return Err(CoreError::Validation(format!("{field} must not be negative")));
    }
    Ok(())
}
