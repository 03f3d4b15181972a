//! # paperroll-db: Storage Layer for Paperroll
//!
//! The on-device SQLite store: schema, one-time seed load, and the product
//! and supplier repositories.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Paperroll Data Flow                              │
//! │                                                                         │
//! │  UI event (product list, price ranking, entry form)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   paperroll-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  ProductRepo  │    │  (embedded)  │  │   │
//! │  │   │               │◄───│  SupplierRepo │    │ 0001_create  │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────▼───────┐    ┌───────────────┐                       │   │
//! │  │   │     Seed      │    │    Notice     │                       │   │
//! │  │   │ suppliers+CSV │    │ banner errors │                       │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │              PRODUCT table        SUPPLIER table                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema chain and explicit reset
//! - [`seed`] - Seed sources and the one-time initial load
//! - [`repository`] - Product and supplier repositories
//! - [`notice`] - User-facing failure notices
//! - [`config`] - TOML configuration for the seed tool
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use paperroll_core::{ProductColumn, SupplierFilter};
//! use paperroll_db::{BuiltinSuppliers, CsvProducts, Database, DbConfig};
//!
//! # async fn run() -> Result<(), paperroll_db::DbError> {
//! let db = Database::new(DbConfig::new("paperroll.db")).await?;
//!
//! let report = db
//!     .load_initial_data(&BuiltinSuppliers, &CsvProducts::bundled())
//!     .await?;
//! println!("{report}");
//!
//! let dearest_first = db
//!     .products()
//!     .find_sorted(ProductColumn::SheetPrice, &SupplierFilter::All)
//!     .await?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod notice;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::AppConfig;
pub use error::{DbError, DbResult, SeedError};
pub use notice::{Notice, NoticeCode};
pub use pool::{Database, DbConfig};
pub use seed::{BuiltinSuppliers, CsvProducts, ProductSource, SeedReport, SupplierSource};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::supplier::SupplierRepository;
