//! # Validation Module
//!
//! Input parsing and checks for the ordering page.
//!
//! ## Number Inputs
//! The table's numeric cells behave like HTML number inputs: a blank or
//! unparsable value has no number (NaN on the page), it is never zero.
//! [`parse_number_input`] is the single place that rule lives.
//!
//! ## Usage
//! ```rust
//! use orderdesk_core::validation::{parse_number_input, validate_product_code};
//!
//! assert_eq!(parse_number_input(" 3 "), Some(3.0));
//! assert_eq!(parse_number_input(""), None);
//!
//! assert!(validate_product_code("BOLT-M8").is_ok());
//! assert!(validate_product_code("  ").is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_PRODUCT_CODE_LEN, MAX_SEARCH_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Number Inputs
// =============================================================================

/// Parses a number-input value.
///
/// Returns `None` for blank, non-numeric or non-finite text.
pub fn parse_number_input(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses a number-input value, reporting which field was wrong.
pub fn require_number(field: &str, raw: &str) -> ValidationResult<f64> {
    parse_number_input(raw).ok_or_else(|| ValidationError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Renders a number the way a number input displays it: `12`, `12.5`.
pub fn format_number_input(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code used as lookup key.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "product code".to_string(),
        });
    }

    if code.chars().count() > MAX_PRODUCT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "product code".to_string(),
            max: MAX_PRODUCT_CODE_LEN,
        });
    }

    Ok(())
}

/// Validates the partial name sent to the supplier search.
///
/// ## Returns
/// The text unchanged; only its length is checked.
pub fn validate_search_text(text: &str) -> ValidationResult<&str> {
    if text.chars().count() > MAX_SEARCH_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "search text".to_string(),
            max: MAX_SEARCH_TEXT_LEN,
        });
    }

    Ok(text)
}

/// Validates a supplier identifier.
pub fn validate_supplier_id(supplier: &str) -> ValidationResult<()> {
    if supplier.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "supplier".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity as entered in a row.
///
/// ## Rules
/// - Must be a number
/// - Must not be negative
pub fn validate_quantity(raw: &str) -> ValidationResult<f64> {
    let qty = require_number("quantity", raw)?;
    if qty < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0.0,
            max: f64::MAX,
        });
    }
    Ok(qty)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_input() {
        assert_eq!(parse_number_input("3"), Some(3.0));
        assert_eq!(parse_number_input("2.75"), Some(2.75));
        assert_eq!(parse_number_input("-1"), Some(-1.0));
        assert_eq!(parse_number_input(""), None);
        assert_eq!(parse_number_input("   "), None);
        assert_eq!(parse_number_input("abc"), None);
        assert_eq!(parse_number_input("NaN"), None);
        assert_eq!(parse_number_input("inf"), None);
    }

    #[test]
    fn test_format_number_input() {
        assert_eq!(format_number_input(12.0), "12");
        assert_eq!(format_number_input(12.5), "12.5");
        assert_eq!(format_number_input(f64::NAN), "");
    }

    #[test]
    fn test_validate_product_code() {
        assert!(validate_product_code("BOLT-M8").is_ok());
        assert!(validate_product_code("").is_err());
        assert!(validate_product_code(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_search_text() {
        assert_eq!(validate_search_text("bol").unwrap(), "bol");
        assert!(validate_search_text(&"b".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_supplier_id() {
        assert!(validate_supplier_id("17").is_ok());
        assert!(validate_supplier_id(" ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity("4").unwrap(), 4.0);
        assert!(validate_quantity("-2").is_err());
        assert!(validate_quantity("").is_err());
    }
}
