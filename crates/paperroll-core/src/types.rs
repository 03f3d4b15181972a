//! # Domain Types
//!
//! Records exchanged between the storage layer and the UI.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐          ┌─────────────────────────┐     │
//! │  │        Product           │          │        Supplier         │     │
//! │  │  ──────────────────────  │          │  ─────────────────────  │     │
//! │  │  uid (store-assigned)    │  label   │  name (primary key)     │     │
//! │  │  data: ProductData ──────┼─ ─ ─ ─ ─►│  chain                  │     │
//! │  │  time_stamp              │ (soft)   │  time_stamp             │     │
//! │  └──────────────────────────┘          └─────────────────────────┘     │
//! │                                                                         │
//! │  ProductData  = everything a user (or the seed CSV) can set            │
//! │  NewSupplier  = everything a user (or the seed list) can set           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft Supplier Reference
//! `ProductData::supplier` is a free-text label. It usually matches a
//! `Supplier::name`, but nothing enforces it and no join is ever made.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// The user-settable part of a product: one filled-in entry form or one row
/// of the seed CSV.
///
/// ## Units
/// - `sheet_width`, `sheet_length`: millimetres
/// - `roll_length`: metres
/// - `package_weight`, `roll_weight`: kilograms
/// - `paper_weight`: grams per square metre
/// - prices: store currency
///
/// ## Calculated Flags
/// Each `*_c` flag records whether the neighbouring value was derived by
/// [`ProductData::calculate`] rather than typed in. The flags are advisory UI
/// state and carry no stored constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductData {
    /// Number of layers (plies).
    pub layers: i64,

    /// Rolls in one package.
    pub package_rolls: i64,

    /// Sheets on one roll.
    pub roll_sheets: i64,

    /// Sheet width in mm.
    pub sheet_width: i64,

    /// Sheet length in mm.
    pub sheet_length: i64,
    pub sheet_length_c: bool,

    /// Roll length in m.
    pub roll_length: f64,
    pub roll_length_c: bool,

    /// Price of the whole package.
    pub package_price: f64,

    pub roll_price: f64,
    pub roll_price_c: bool,

    /// Paper weight in g/m².
    pub paper_weight: f64,
    pub paper_weight_c: bool,

    /// Package weight in kg.
    pub package_weight: f64,
    pub package_weight_c: bool,

    /// Roll weight in kg.
    pub roll_weight: f64,
    pub roll_weight_c: bool,

    pub kilo_price: f64,
    pub kilo_price_c: bool,

    pub meter_price: f64,
    pub meter_price_c: bool,

    pub sheet_price: f64,
    pub sheet_price_c: bool,

    /// Shop name. Free text, not checked against the supplier table.
    pub supplier: String,

    pub comments: String,

    /// External identifier, usually the scanned barcode. Not unique.
    pub item_no: String,

    pub brand: String,
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier. Assigned once on insert, never reused.
    pub uid: i64,

    /// Everything that was inserted.
    #[serde(flatten)]
    pub data: ProductData,

    /// Creation time, assigned by the store.
    #[ts(as = "String")]
    pub time_stamp: DateTime<Utc>,
}

impl Product {
    /// Returns true when the product's supplier label names `supplier`.
    ///
    /// Exact string equality, the same rule the storage filters use.
    #[inline]
    pub fn is_sold_by(&self, supplier: &str) -> bool {
        self.data.supplier == supplier
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// A shop to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewSupplier {
    /// Shop name (primary key).
    pub name: String,

    /// Chain or parent company.
    pub chain: String,
}

impl NewSupplier {
    /// Creates a new supplier record.
    pub fn new(name: impl Into<String>, chain: impl Into<String>) -> Self {
        NewSupplier {
            name: name.into(),
            chain: chain.into(),
        }
    }
}

/// A stored shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Supplier {
    pub name: String,
    pub chain: String,

    #[ts(as = "String")]
    pub time_stamp: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_flat() {
        let product = Product {
            uid: 7,
            data: ProductData {
                brand: "Lambi Classic 9".to_string(),
                item_no: "170190".to_string(),
                package_price: 34.95,
                ..ProductData::default()
            },
            time_stamp: Utc::now(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["uid"], 7);
        assert_eq!(json["brand"], "Lambi Classic 9");
        assert_eq!(json["itemNo"], "170190");
        assert_eq!(json["sheetLengthC"], false);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_is_sold_by_is_exact() {
        let product = Product {
            uid: 1,
            data: ProductData {
                supplier: "Bilka Hillerød".to_string(),
                ..ProductData::default()
            },
            time_stamp: Utc::now(),
        };

        assert!(product.is_sold_by("Bilka Hillerød"));
        assert!(!product.is_sold_by("Bilka"));
        assert!(!product.is_sold_by("bilka hillerød"));
    }
}
