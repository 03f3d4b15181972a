//! # Repository Module
//!
//! Database repository implementations for Paperroll.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  UI event                                                              │
//! │       │                                                                 │
//! │       │  db.products().find_sorted(PackagePrice, &SupplierFilter::All) │
//! │       ▼                                                                 │
//! │  ProductRepository / SupplierRepository                                │
//! │       │                                                                 │
//! │       │  one statement, typed columns, bound values                    │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rows.rs maps each row by column name into a record                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product lookups, ranking, insert, delete
//! - [`SupplierRepository`](supplier::SupplierRepository) - Supplier lookup, insert, delete

pub mod product;
pub(crate) mod rows;
pub mod supplier;
