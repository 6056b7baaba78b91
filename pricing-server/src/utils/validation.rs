//! Input validation helpers
//!
//! Text length limits for company, finance record and product payloads.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: company, product, saved calculation
pub const MAX_NAME_LEN: usize = 200;

/// Expense and revenue descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: SKU
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("{field} must not be empty"))
                .with_detail("field", field),
        );
    }
    validate_text_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_text_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate that a string is within the length limit (counted in chars).
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Acme", "name", MAX_NAME_LEN).is_ok());

        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = validate_required_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "name");
    }

    #[test]
    fn test_length_counts_chars() {
        let accented = "ç".repeat(MAX_SHORT_TEXT_LEN);
        assert!(validate_text_len(&accented, "sku", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(validate_text_len(&format!("{accented}a"), "sku", MAX_SHORT_TEXT_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "sku", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(validate_optional_text(&Some("AB-1".into()), "sku", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("9".repeat(101)), "sku", MAX_SHORT_TEXT_LEN).is_err()
        );
    }
}
