//! # paperroll-core: Domain Types for Paperroll
//!
//! Pure records and rules for tracking toilet-paper products, their prices
//! and the shops that sell them. Nothing in this crate touches a database,
//! a file or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Paperroll Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI layer (out of tree)                       │   │
//! │  │    Entry form ──► Product list ──► Price ranking ──► Banner     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ paperroll-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  columns  │  │  pricing  │  │ validation│  │   │
//! │  │   │  Product  │  │ Product-  │  │ unit      │  │   rules   │  │   │
//! │  │   │  Supplier │  │ Column    │  │ prices    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 paperroll-db (Storage Layer)                    │   │
//! │  │          SQLite schema, seeding, repositories                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and supplier records
//! - [`columns`] - Closed sets of table columns, filters and sort options
//! - [`pricing`] - Derived unit prices (per roll, sheet, meter, kilo)
//! - [`validation`] - Input checks run before a record is stored
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use paperroll_core::{DerivedField, ProductData};
//!
//! let mut form = ProductData {
//!     package_rolls: 9,
//!     roll_sheets: 255,
//!     sheet_length: 125,
//!     package_price: 34.95,
//!     ..ProductData::default()
//! };
//!
//! let derived = form.calculate();
//! assert!(derived.contains(&DerivedField::RollPrice));
//! assert!(form.roll_price_c);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod columns;
pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use columns::{
    ColumnKind, FilterValue, ProductColumn, ProductFilter, SortDirection, SupplierColumn,
    SupplierFilter,
};
pub use error::{CoreError, ValidationError};
pub use pricing::DerivedField;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel the price-ranking screen sends when no shop is selected.
///
/// Parsed into [`SupplierFilter::All`]; any other string is taken as a
/// supplier name.
pub const ALL_SUPPLIERS: &str = "ALL";

/// Column used when the product list is requested without an explicit order.
pub const DEFAULT_PRODUCT_ORDER: ProductColumn = ProductColumn::Brand;
