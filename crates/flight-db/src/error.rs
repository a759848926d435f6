//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Where Errors Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Before execution                     During execution                 │
//! │  ────────────────                     ────────────────                 │
//! │  DbConfig / URL parsing               pool acquire                     │
//! │  ValidationError (flight-core)        SQL error (sqlx::Error)          │
//! │  TemplateError (flight-core)          row decoding                     │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  Err(DbError)  ← caller handles      Ok(Lookup::Failed(DbError))       │
//! │                                       + tracing::error! event          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flight_core::{CoreError, TemplateError, ValidationError};
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Malformed connection URL
    /// - Database file missing (and `create_if_missing` is off)
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - SQL syntax error, unknown table/column
    /// - Constraint or other SQLite runtime error
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A result column held a value that is not a scalar we return.
    #[error("Unsupported value in column '{column}': {type_name}")]
    UnsupportedColumn { column: String, type_name: String },

    /// Configuration value missing or unparsable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Lookup input rejected before binding.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Template parameters did not line up.
    #[error("Binding failed: {0}")]
    Template(#[from] TemplateError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => DbError::Validation(e),
            CoreError::Template(e) => DbError::Template(e),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::Configuration  → DbError::ConnectionFailed
/// sqlx::Error::Io             → DbError::ConnectionFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::Configuration(e) => DbError::ConnectionFailed(e.to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert_eq!(
            DbError::from(sqlx::Error::PoolClosed).to_string(),
            "Connection failed: Pool is closed"
        );
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Internal(_)
        ));
    }

    #[test]
    fn test_core_error_mapping() {
        let err: DbError = CoreError::from(ValidationError::Required {
            field: "airport code".to_string(),
        })
        .into();
        assert_eq!(err.to_string(), "Invalid input: airport code is required");
    }
}
