//! # Error Types
//!
//! Domain-specific error types for paperroll-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  paperroll-core errors (this file)                                     │
//! │  ├── CoreError        - Unknown columns, wrapped validation failures   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  paperroll-db errors (separate crate)                                  │
//! │  ├── DbError          - Storage and seeding failures                   │
//! │  └── Notice           - What the banner shows (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → Notice → UI banner                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A column name that is not a member of the table's closed column set.
    ///
    /// ## When This Occurs
    /// - A sort key arrives from the UI as text and does not parse
    /// - Someone tries to smuggle SQL through a column name
    #[error("Unknown {table} column: '{name}'")]
    UnknownColumn { table: String, name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub fn unknown_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        CoreError::UnknownColumn {
            table: table.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a record reaches the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Count, measure or price below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// NaN or infinity in a decimal field.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
