//! # Columns, Filters and Sort Options
//!
//! Closed sets of the columns a caller may filter or sort on.
//!
//! ## Why Enums Instead of Strings
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Caller-supplied column names                         │
//! │                                                                         │
//! │  ❌ "PACKAGE_PRICE DESC; DROP TABLE PRODUCT --"                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "PACKAGE_PRICE DESC; ...".parse::<ProductColumn>()                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Err(CoreError::UnknownColumn) ← never reaches SQL                      │
//! │                                                                         │
//! │  ✅ ProductColumn::PackagePrice                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  .name() == "PACKAGE_PRICE" ← the only text spliced into ORDER BY       │
//! │                                                                         │
//! │  Filter values are never spliced: they are bound to a single `?`.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::ALL_SUPPLIERS;

// =============================================================================
// Column Kind
// =============================================================================

/// Storage class of a column, as the repositories read it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Whole number (`INT` / `INTEGER`).
    Integer,
    /// Decimal number (`NUMERIC`).
    Real,
    /// 0/1 "value was calculated" marker.
    Flag,
    /// Free text.
    Text,
    /// Store-assigned creation time.
    Timestamp,
}

// =============================================================================
// Product Columns
// =============================================================================

/// Every column of the `PRODUCT` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ProductColumn {
    Uid,
    Layers,
    PackageRolls,
    RollSheets,
    SheetWidth,
    SheetLength,
    SheetLengthC,
    RollLength,
    RollLengthC,
    PackagePrice,
    RollPrice,
    RollPriceC,
    PaperWeight,
    PaperWeightC,
    PackageWeight,
    PackageWeightC,
    RollWeight,
    RollWeightC,
    KiloPrice,
    KiloPriceC,
    MeterPrice,
    MeterPriceC,
    SheetPrice,
    SheetPriceC,
    Supplier,
    Comments,
    ItemNo,
    Brand,
    TimeStamp,
}

impl ProductColumn {
    /// All columns in table order.
    pub const ALL: [ProductColumn; 29] = [
        ProductColumn::Uid,
        ProductColumn::Layers,
        ProductColumn::PackageRolls,
        ProductColumn::RollSheets,
        ProductColumn::SheetWidth,
        ProductColumn::SheetLength,
        ProductColumn::SheetLengthC,
        ProductColumn::RollLength,
        ProductColumn::RollLengthC,
        ProductColumn::PackagePrice,
        ProductColumn::RollPrice,
        ProductColumn::RollPriceC,
        ProductColumn::PaperWeight,
        ProductColumn::PaperWeightC,
        ProductColumn::PackageWeight,
        ProductColumn::PackageWeightC,
        ProductColumn::RollWeight,
        ProductColumn::RollWeightC,
        ProductColumn::KiloPrice,
        ProductColumn::KiloPriceC,
        ProductColumn::MeterPrice,
        ProductColumn::MeterPriceC,
        ProductColumn::SheetPrice,
        ProductColumn::SheetPriceC,
        ProductColumn::Supplier,
        ProductColumn::Comments,
        ProductColumn::ItemNo,
        ProductColumn::Brand,
        ProductColumn::TimeStamp,
    ];

    /// Storage name of the column.
    pub const fn name(self) -> &'static str {
        match self {
            ProductColumn::Uid => "UID",
            ProductColumn::Layers => "LAYERS",
            ProductColumn::PackageRolls => "PACKAGE_ROLLS",
            ProductColumn::RollSheets => "ROLL_SHEETS",
            ProductColumn::SheetWidth => "SHEET_WIDTH",
            ProductColumn::SheetLength => "SHEET_LENGTH",
            ProductColumn::SheetLengthC => "SHEET_LENGTH_C",
            ProductColumn::RollLength => "ROLL_LENGTH",
            ProductColumn::RollLengthC => "ROLL_LENGTH_C",
            ProductColumn::PackagePrice => "PACKAGE_PRICE",
            ProductColumn::RollPrice => "ROLL_PRICE",
            ProductColumn::RollPriceC => "ROLL_PRICE_C",
            ProductColumn::PaperWeight => "PAPER_WEIGHT",
            ProductColumn::PaperWeightC => "PAPER_WEIGHT_C",
            ProductColumn::PackageWeight => "PACKAGE_WEIGHT",
            ProductColumn::PackageWeightC => "PACKAGE_WEIGHT_C",
            ProductColumn::RollWeight => "ROLL_WEIGHT",
            ProductColumn::RollWeightC => "ROLL_WEIGHT_C",
            ProductColumn::KiloPrice => "KILO_PRICE",
            ProductColumn::KiloPriceC => "KILO_PRICE_C",
            ProductColumn::MeterPrice => "METER_PRICE",
            ProductColumn::MeterPriceC => "METER_PRICE_C",
            ProductColumn::SheetPrice => "SHEET_PRICE",
            ProductColumn::SheetPriceC => "SHEET_PRICE_C",
            ProductColumn::Supplier => "SUPPLIER",
            ProductColumn::Comments => "COMMENTS",
            ProductColumn::ItemNo => "ITEM_NO",
            ProductColumn::Brand => "BRAND",
            ProductColumn::TimeStamp => "TIME_STAMP",
        }
    }

    /// How the column's values are stored and read.
    pub const fn kind(self) -> ColumnKind {
        match self {
            ProductColumn::Uid
            | ProductColumn::Layers
            | ProductColumn::PackageRolls
            | ProductColumn::RollSheets
            | ProductColumn::SheetWidth
            | ProductColumn::SheetLength => ColumnKind::Integer,

            ProductColumn::RollLength
            | ProductColumn::PackagePrice
            | ProductColumn::RollPrice
            | ProductColumn::PaperWeight
            | ProductColumn::PackageWeight
            | ProductColumn::RollWeight
            | ProductColumn::KiloPrice
            | ProductColumn::MeterPrice
            | ProductColumn::SheetPrice => ColumnKind::Real,

            ProductColumn::SheetLengthC
            | ProductColumn::RollLengthC
            | ProductColumn::RollPriceC
            | ProductColumn::PaperWeightC
            | ProductColumn::PackageWeightC
            | ProductColumn::RollWeightC
            | ProductColumn::KiloPriceC
            | ProductColumn::MeterPriceC
            | ProductColumn::SheetPriceC => ColumnKind::Flag,

            ProductColumn::Supplier
            | ProductColumn::Comments
            | ProductColumn::ItemNo
            | ProductColumn::Brand => ColumnKind::Text,

            ProductColumn::TimeStamp => ColumnKind::Timestamp,
        }
    }

}

impl fmt::Display for ProductColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProductColumn {
    type Err = CoreError;

    /// Parses a storage name (case-insensitive). Only members of the closed
    /// set are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProductColumn::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::unknown_column("PRODUCT", s))
    }
}

// =============================================================================
// Supplier Columns
// =============================================================================

/// Every column of the `SUPPLIER` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum SupplierColumn {
    Supplier,
    Chain,
    TimeStamp,
}

impl SupplierColumn {
    /// All columns in table order.
    pub const ALL: [SupplierColumn; 3] = [
        SupplierColumn::Supplier,
        SupplierColumn::Chain,
        SupplierColumn::TimeStamp,
    ];

    /// Storage name of the column.
    pub const fn name(self) -> &'static str {
        match self {
            SupplierColumn::Supplier => "SUPPLIER",
            SupplierColumn::Chain => "CHAIN",
            SupplierColumn::TimeStamp => "TIME_STAMP",
        }
    }
}

impl fmt::Display for SupplierColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SupplierColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SupplierColumn::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::unknown_column("SUPPLIER", s))
    }
}

// =============================================================================
// Filter Values
// =============================================================================

/// A value compared for equality against one column.
///
/// Always bound as a query parameter, never formatted into SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Integer(value as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Real(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Integer(v) => write!(f, "{}", v),
            FilterValue::Real(v) => write!(f, "{}", v),
            FilterValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// Single-column equality predicate on products.
///
/// ## Example
/// ```rust
/// use paperroll_core::{ProductColumn, ProductFilter};
///
/// let filter = ProductFilter::by_item_no("5705830002242");
/// assert_eq!(filter.column, ProductColumn::ItemNo);
///
/// let layers = ProductFilter::eq(ProductColumn::Layers, 3_i64);
/// assert_eq!(layers.to_string(), "LAYERS = 3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub column: ProductColumn,
    pub value: FilterValue,
}

impl ProductFilter {
    /// Equality on any product column.
    pub fn eq(column: ProductColumn, value: impl Into<FilterValue>) -> Self {
        ProductFilter {
            column,
            value: value.into(),
        }
    }

    pub fn by_uid(uid: i64) -> Self {
        Self::eq(ProductColumn::Uid, uid)
    }

    pub fn by_brand(brand: impl Into<String>) -> Self {
        Self::eq(ProductColumn::Brand, brand.into())
    }

    pub fn by_item_no(item_no: impl Into<String>) -> Self {
        Self::eq(ProductColumn::ItemNo, item_no.into())
    }

    pub fn by_supplier(supplier: impl Into<String>) -> Self {
        Self::eq(ProductColumn::Supplier, supplier.into())
    }
}

impl fmt::Display for ProductFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

// =============================================================================
// Supplier Filter
// =============================================================================

/// Optional supplier restriction for the price ranking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SupplierFilter {
    /// Every product.
    #[default]
    All,
    /// Only products whose supplier label equals this name exactly.
    Only(String),
}

impl SupplierFilter {
    /// Name to match, or `None` for [`SupplierFilter::All`].
    pub fn supplier(&self) -> Option<&str> {
        match self {
            SupplierFilter::All => None,
            SupplierFilter::Only(name) => Some(name),
        }
    }
}

impl FromStr for SupplierFilter {
    type Err = std::convert::Infallible;

    /// `"ALL"` means no restriction; anything else is a supplier name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_SUPPLIERS {
            Ok(SupplierFilter::All)
        } else {
            Ok(SupplierFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for SupplierFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplierFilter::All => f.write_str(ALL_SUPPLIERS),
            SupplierFilter::Only(name) => f.write_str(name),
        }
    }
}

// =============================================================================
// Sort Direction
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// SQL keyword for ORDER BY.
    pub const fn keyword(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
