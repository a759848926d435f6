//! # Validation Module
//!
//! Input checks and normalisation applied before a lookup is bound.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer                                           │
//! │  └── Parses user text into numbers/strings                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Airport codes: non-empty, alphanumeric                            │
//! │  ├── Dates: real calendar dates (see FlightDate)                       │
//! │  └── Carrier text: LIKE wildcards escaped                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  └── Exact/LIKE matching, delay filter                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use flight_core::validation::{contains_pattern, validate_airport_code};
//!
//! validate_airport_code("ATL").unwrap();
//! assert_eq!(contains_pattern("delta"), "%delta%");
//! ```

use crate::error::ValidationError;
use crate::LIKE_ESCAPE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest airport code accepted. IATA codes are 3 characters; some
/// datasets use 5-digit numeric airport ids.
pub const MAX_AIRPORT_CODE_LEN: usize = 8;

/// Validates an airport code used for exact matching.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_AIRPORT_CODE_LEN`] characters
/// - ASCII letters and digits only
///
/// The code is not trimmed or upper-cased: matching is exact.
///
/// ## Example
/// ```rust
/// use flight_core::validation::validate_airport_code;
///
/// assert!(validate_airport_code("JFK").is_ok());
/// assert!(validate_airport_code("10397").is_ok());
/// assert!(validate_airport_code("").is_err());
/// assert!(validate_airport_code(" JFK").is_err());
/// ```
pub fn validate_airport_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "airport code".to_string(),
        });
    }

    if code.len() > MAX_AIRPORT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "airport code".to_string(),
            max: MAX_AIRPORT_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "airport code".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Escapes LIKE wildcards (`%`, `_`) and the escape character itself.
///
/// Pair with `ESCAPE '\'` in the SQL.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Builds a LIKE pattern matching any value containing `text` literally.
///
/// An empty `text` yields `%%`, which matches everything.
pub fn contains_pattern(text: &str) -> String {
    format!("%{}%", escape_like(text))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_airport_code() {
        assert!(validate_airport_code("ATL").is_ok());
        assert!(validate_airport_code("10397").is_ok());

        assert!(matches!(
            validate_airport_code(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_airport_code("ABCDEFGHI"),
            Err(ValidationError::TooLong { max: 8, .. })
        ));
        assert!(matches!(
            validate_airport_code("AT L"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_airport_code("ATL'--"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("delta"), "delta");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("Delta"), "%Delta%");
        assert_eq!(contains_pattern(""), "%%");
        assert_eq!(contains_pattern("%"), "%\\%%");
    }
}
