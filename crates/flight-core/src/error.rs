//! # Error Types
//!
//! Domain-specific error types for flight-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  flight-core errors (this file)                                        │
//! │  ├── CoreError        - Wraps the two below                            │
//! │  ├── ValidationError  - Input rejected before binding                  │
//! │  └── TemplateError    - Template/parameter mismatch                    │
//! │                                                                         │
//! │  flight-db errors (separate crate)                                     │
//! │  └── DbError          - Connection and query failures                  │
//! │                                                                         │
//! │  Flow: ValidationError / TemplateError → DbError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by flight-core before anything reaches the database.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Template error (wraps TemplateError).
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input can never match a row, so the
/// query is not sent at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., airport code with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Day/month/year do not name a real calendar date.
    #[error("{day}/{month}/{year} is not a valid date")]
    InvalidDate { day: u32, month: u32, year: i32 },
}

// =============================================================================
// Template Error
// =============================================================================

/// Errors binding a [`crate::template::Params`] set to a template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template names a placeholder the caller did not supply.
    #[error("Template '{template}' is missing parameter ':{name}'")]
    MissingParameter { template: String, name: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "airport".to_string(),
        };
        assert_eq!(err.to_string(), "airport is required");

        let err = ValidationError::InvalidDate {
            day: 31,
            month: 2,
            year: 2015,
        };
        assert_eq!(err.to_string(), "31/2/2015 is not a valid date");
    }

    #[test]
    fn test_template_error_message() {
        let err = TemplateError::MissingParameter {
            template: "flight_by_id".to_string(),
            name: "id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Template 'flight_by_id' is missing parameter ':id'"
        );
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "airport".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = TemplateError::MissingParameter {
            template: "t".to_string(),
            name: "x".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Template(_)));
    }
}
