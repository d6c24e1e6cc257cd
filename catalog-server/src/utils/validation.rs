//! Input validation helpers
//!
//! Centralized length limits and validation functions for admin input and
//! listing query parameters.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product title, category, brand
pub const MAX_NAME_LEN: usize = 200;

/// Slugs / skus
pub const MAX_SLUG_LEN: usize = 120;

/// Spec keys (before normalization)
pub const MAX_SPEC_KEY_LEN: usize = 100;

/// Featured spec keys per category
pub const MAX_FEATURED_KEYS: usize = 200;

/// Free-text search term
pub const MAX_SEARCH_LEN: usize = 200;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_field(
            field,
            format!("{field} must not be empty"),
        ));
    }
    validate_max_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        validate_max_len(v, field, max_len)?;
    }
    Ok(())
}

fn validate_max_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::invalid_field(
            field,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Validate a slug: lowercase ascii letters, digits and `-`.
pub fn validate_slug(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_SLUG_LEN)?;
    let ok = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !ok {
        return Err(AppError::invalid_field(
            field,
            format!("{field} may only contain a-z, 0-9 and '-'"),
        ));
    }
    Ok(())
}
