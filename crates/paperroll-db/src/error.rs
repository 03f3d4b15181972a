//! # Database Error Types
//!
//! Error types for storage and seeding.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)     CSV row (csv::Error, parse failures)   │
//! │       │                               │                                 │
//! │       ▼                               ▼                                 │
//! │  DbError (this module) ◄──────── SeedError                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Notice (notice.rs) ← Serialized for the banner                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI shows the raw error text                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use paperroll_core::ValidationError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a supplier whose name is already stored
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),

    /// A seed step found rows already present.
    ///
    /// ## When This Occurs
    /// - The initial load runs a second time
    /// - The user added rows before the first load
    ///
    /// Existing rows are left untouched.
    #[error("{table} already contains {count} rows")]
    AlreadySeeded { table: String, count: i64 },

    /// A seed row could not be produced.
    #[error("Seed data error: {0}")]
    Seed(#[from] SeedError),

    /// The record failed validation and was not stored.
    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),
}

impl DbError {
    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn already_seeded(table: impl Into<String>, count: i64) -> Self {
        DbError::AlreadySeeded {
            table: table.into(),
            count,
        }
    }

    /// Returns true for a uniqueness violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → UniqueViolation or QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                if db_err.is_unique_violation() || msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Seed Error
// =============================================================================

/// Failures while producing seed rows.
///
/// `line` is the 1-based line of the CSV file, header included.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed asset could not be opened or read.
    #[error("Seed asset unavailable: {0}")]
    AssetUnavailable(String),

    /// A row had the wrong shape.
    #[error("Malformed seed row at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    /// A numeric field did not parse.
    #[error("Malformed number at line {line}, field {field}: '{value}'")]
    MalformedNumber {
        line: u64,
        field: &'static str,
        value: String,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_seeded_message_carries_count() {
        let err = DbError::already_seeded("SUPPLIER", 11);
        assert_eq!(err.to_string(), "SUPPLIER already contains 11 rows");
    }

    #[test]
    fn test_seed_error_converts() {
        let err: DbError = SeedError::MalformedNumber {
            line: 3,
            field: "PACKAGE_ROLLS",
            value: "nine".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Seed data error: Malformed number at line 3, field PACKAGE_ROLLS: 'nine'"
        );
    }

    #[test]
    fn test_validation_error_converts() {
        let err: DbError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, DbError::Invalid(_)));
        assert!(!err.is_unique_violation());
    }
}
