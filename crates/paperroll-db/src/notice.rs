//! # Notices
//!
//! What the UI banner shows when an operation fails.
//!
//! ## Serialization
//! ```json
//! {
//!   "code": "ALREADY_SEEDED",
//!   "message": "SUPPLIER already contains 11 rows"
//! }
//! ```
//!
//! `message` is the raw error text; the banner shows it unchanged.
//! `code` lets the UI pick a colour or an action without parsing text.

use paperroll_core::CoreError;
use serde::Serialize;

use crate::error::DbError;

/// A user-facing failure notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Machine-readable code
    pub code: NoticeCode,

    /// Raw error text for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeCode {
    /// Seed step refused: table not empty
    AlreadySeeded,

    /// Seed data could not be parsed or read
    SeedData,

    /// Duplicate supplier name
    Duplicate,

    /// Record or argument failed validation
    Invalid,

    /// Connection, migration or query failure
    Database,
}

impl Notice {
    pub fn new(code: NoticeCode, message: impl Into<String>) -> Self {
        Notice {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Converts storage errors to notices.
impl From<&DbError> for Notice {
    fn from(err: &DbError) -> Self {
        let code = match err {
            DbError::AlreadySeeded { .. } => NoticeCode::AlreadySeeded,
            DbError::Seed(_) => NoticeCode::SeedData,
            DbError::UniqueViolation { .. } => NoticeCode::Duplicate,
            DbError::Invalid(_) => NoticeCode::Invalid,
            DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::PoolExhausted
            | DbError::Internal(_) => {
                tracing::error!(error = %err, "Storage failure");
                NoticeCode::Database
            }
        };
        Notice::new(code, err.to_string())
    }
}

impl From<DbError> for Notice {
    fn from(err: DbError) -> Self {
        Notice::from(&err)
    }
}

/// Converts core errors to notices.
impl From<CoreError> for Notice {
    fn from(err: CoreError) -> Self {
        Notice::new(NoticeCode::Invalid, err.to_string())
    }
}
