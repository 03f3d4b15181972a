//! # Database Migrations
//!
//! Embedded, forward-only schema chain for the product store.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  ensure_schema()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table                                          │
//! │       │                                                                 │
//! │       ├── Table doesn't exist? Create it                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs applied                                │
//! │       │                                                                 │
//! │       ├── 0001_create_tables.sql ✓ (already applied)                  │
//! │       └── 0002_...               ⬜ (NEW - needs to run)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record each version                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNNN_description.sql` (e.g., `0002_add_brand_index.sql`)
//! 3. Use `ALTER TABLE` / `CREATE ... IF NOT EXISTS`; stored rows must survive
//! 4. **NEVER** modify existing migrations - always add new ones
//!
//! ## Reset
//! Dropping every table is never part of an upgrade. [`reset_schema`] does
//! it on request only, and logs a warning when it does.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Statements run by [`reset_schema`], ledger last.
const RESET_STATEMENTS: [&str; 3] = [
    "DROP TABLE IF EXISTS PRODUCT",
    "DROP TABLE IF EXISTS SUPPLIER",
    "DROP TABLE IF EXISTS _sqlx_migrations",
];

/// Applies all pending migrations.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
/// - Ordered: migrations run in version order (0001, 0002, ...)
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns true once the sqlx ledger table exists.
async fn ledger_exists(pool: &SqlitePool) -> DbResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}

/// Returns the highest successfully applied migration version.
///
/// `None` on a fresh store where the ledger does not exist yet. Storage
/// failures are returned as errors.
pub async fn schema_version(pool: &SqlitePool) -> DbResult<Option<i64>> {
    if !ledger_exists(pool).await? {
        return Ok(None);
    }

    let version: Option<i64> =
        sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok(version)
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (embedded_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    if !ledger_exists(pool).await? {
        return Ok((total, 0));
    }

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((total, applied as usize))
}

/// Drops both tables and the migration ledger, then re-applies the chain.
///
/// Every stored product and supplier is lost.
pub async fn reset_schema(pool: &SqlitePool) -> DbResult<()> {
    warn!("Resetting schema, all stored rows will be dropped");

    for statement in RESET_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    ensure_schema(pool).await
}
