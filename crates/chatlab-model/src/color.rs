//! Hex color validation
//!
//! Two stages:
//! - [`validate_color_input`]: accepted while typing, `#` plus 0–6 hex digits
//! - [`finalize_color`]: accepted at save time, exactly 6 hex digits

use crate::error::ValidationError;

/// Maximum number of hex digits in a color value
pub const HEX_DIGITS: usize = 6;

/// Validate an in-progress color edit
///
/// Partial values such as `#`, `#6` or `#6366` are legal. The value is
/// returned unchanged when accepted.
///
/// # Errors
/// - `MissingHash` if the value does not start with `#`
/// - `InvalidHexDigit` on the first non-hex character
/// - `TooLong` if more than six digits follow the `#`
///
/// # Examples
/// ```
/// # use chatlab_model::color::validate_color_input;
/// assert!(validate_color_input("#63").is_ok());
/// assert!(validate_color_input("#63z").is_err());
/// ```
pub fn validate_color_input(raw: &str) -> Result<&str, ValidationError> {
    let digits = raw.strip_prefix('#').ok_or_else(|| ValidationError::MissingHash {
        field: String::new(),
        value: raw.to_string(),
    })?;
    check_digits(raw, digits)?;
    Ok(raw)
}

/// Normalize a color for persistence
///
/// Accepts six hex digits with or without the leading `#` and returns
/// `"#" + digits`. Case is preserved, so the function is idempotent.
///
/// # Errors
/// Returns `Incomplete` when fewer than six digits are present, plus the
/// same character errors as [`validate_color_input`].
pub fn finalize_color(raw: &str) -> Result<String, ValidationError> {
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    check_digits(raw, digits)?;
    if digits.len() < HEX_DIGITS {
        return Err(ValidationError::Incomplete {
            field: String::new(),
            value: raw.to_string(),
        });
    }
    Ok(format!("#{digits}"))
}

/// Check whether a value is already a complete `#rrggbb` color
#[inline]
#[must_use]
pub fn is_complete(raw: &str) -> bool {
    raw.len() == HEX_DIGITS + 1 && finalize_color(raw).is_ok_and(|c| c == raw)
}

fn check_digits(raw: &str, digits: &str) -> Result<(), ValidationError> {
    if let Some(found) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidHexDigit {
            field: String::new(),
            value: raw.to_string(),
            found,
        });
    }
    if digits.len() > HEX_DIGITS {
        return Err(ValidationError::TooLong {
            field: String::new(),
            value: raw.to_string(),
            digits: digits.len(),
        });
    }
    Ok(())
}
