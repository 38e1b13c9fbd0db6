//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - ESC/POS 80mm kitchen printer line width: 48 chars
//! - Reasonable UX limits for names, notes, addresses

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_NAME_LEN: usize = 200;

/// Line notes, override reasons, cancel reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, postcode, table number
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Address lines and city
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Money limits ────────────────────────────────────────────────────

/// Maximum allowed unit price (override or catalog)
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Whitespace-only strings count as empty
#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if is_blank(value) {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that a string is within the length limit.
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
        assert!(validate_required_text("Table 5", "table", MAX_SHORT_TEXT_LEN).is_ok());
        let err = validate_required_text("   ", "table", MAX_SHORT_TEXT_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "table must not be empty");
    }

    #[test]
    fn test_text_len_counts_chars() {
        let note = "é".repeat(MAX_NOTE_LEN);
        assert!(validate_text_len(&note, "note", MAX_NOTE_LEN).is_ok());
        let too_long = "x".repeat(MAX_NOTE_LEN + 1);
        assert!(validate_text_len(&too_long, "note", MAX_NOTE_LEN).is_err());
    }
}
