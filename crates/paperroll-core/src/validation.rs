//! # Validation Module
//!
//! Input checks run before a record is inserted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Entry form (UI)                                              │
//! │  └── Numeric keyboards, barcode scanner                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text length limits                                                │
//! │  └── No negative, NaN or infinite numbers                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── SUPPLIER primary key (unique name)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty text is accepted for products: a scanned item may be stored before
//! the brand is known. Item numbers are not checked for uniqueness.
//!
//! ## Usage
//! ```rust
//! use paperroll_core::validation::{validate_product, validate_supplier};
//! use paperroll_core::{NewSupplier, ProductData};
//!
//! assert!(validate_product(&ProductData::default()).is_ok());
//! assert!(validate_supplier(&NewSupplier::new("Rema Vejby", "REMA 1000")).is_ok());
//! assert!(validate_supplier(&NewSupplier::new("  ", "Coop")).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewSupplier, ProductData};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

pub const MAX_ITEM_NO_LEN: usize = 50;
pub const MAX_BRAND_LEN: usize = 200;
pub const MAX_SUPPLIER_LEN: usize = 100;
pub const MAX_CHAIN_LEN: usize = 100;
pub const MAX_COMMENTS_LEN: usize = 1000;
pub const MAX_LAYERS: i64 = 10;

// =============================================================================
// Field Validators
// =============================================================================

fn check_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn check_count(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn check_amount(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a layer (ply) count.
///
/// ## Rules
/// - Between 0 and 10; zero means "not entered"
pub fn validate_layers(layers: i64) -> ValidationResult<()> {
    if !(0..=MAX_LAYERS).contains(&layers) {
        return Err(ValidationError::OutOfRange {
            field: "layers".to_string(),
            min: 0,
            max: MAX_LAYERS,
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product before insert.
///
/// Returns the first failing rule.
pub fn validate_product(product: &ProductData) -> ValidationResult<()> {
    check_len("item_no", &product.item_no, MAX_ITEM_NO_LEN)?;
    check_len("brand", &product.brand, MAX_BRAND_LEN)?;
    check_len("supplier", &product.supplier, MAX_SUPPLIER_LEN)?;
    check_len("comments", &product.comments, MAX_COMMENTS_LEN)?;

    validate_layers(product.layers)?;
    check_count("package_rolls", product.package_rolls)?;
    check_count("roll_sheets", product.roll_sheets)?;
    check_count("sheet_width", product.sheet_width)?;
    check_count("sheet_length", product.sheet_length)?;

    check_amount("roll_length", product.roll_length)?;
    check_amount("package_price", product.package_price)?;
    check_amount("roll_price", product.roll_price)?;
    check_amount("paper_weight", product.paper_weight)?;
    check_amount("package_weight", product.package_weight)?;
    check_amount("roll_weight", product.roll_weight)?;
    check_amount("kilo_price", product.kilo_price)?;
    check_amount("meter_price", product.meter_price)?;
    check_amount("sheet_price", product.sheet_price)?;

    Ok(())
}

/// Validates a supplier before insert.
///
/// ## Rules
/// - Name must not be blank (it is the primary key)
/// - Name and chain at most 100 characters
pub fn validate_supplier(supplier: &NewSupplier) -> ValidationResult<()> {
    if supplier.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    check_len("name", &supplier.name, MAX_SUPPLIER_LEN)?;
    check_len("chain", &supplier.chain, MAX_CHAIN_LEN)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product() {
        let product = ProductData {
            item_no: "5705830002242".to_string(),
            brand: "Lambi Classic 9".to_string(),
            layers: 3,
            package_rolls: 9,
            package_price: 34.95,
            ..ProductData::default()
        };
        assert!(validate_product(&product).is_ok());
        assert!(validate_product(&ProductData::default()).is_ok());
    }

    #[test]
    fn test_text_limits() {
        let product = ProductData {
            item_no: "9".repeat(51),
            ..ProductData::default()
        };
        assert_eq!(
            validate_product(&product),
            Err(ValidationError::TooLong {
                field: "item_no".to_string(),
                max: 50
            })
        );

        // Counted in characters, not bytes
        let product = ProductData {
            supplier: "ø".repeat(100),
            ..ProductData::default()
        };
        assert!(validate_product(&product).is_ok());
    }

    #[test]
    fn test_numeric_rules() {
        let negative = ProductData {
            package_rolls: -1,
            ..ProductData::default()
        };
        assert!(matches!(
            validate_product(&negative),
            Err(ValidationError::Negative { .. })
        ));

        let nan = ProductData {
            kilo_price: f64::NAN,
            ..ProductData::default()
        };
        assert!(matches!(
            validate_product(&nan),
            Err(ValidationError::NotFinite { .. })
        ));

        let too_many_layers = ProductData {
            layers: 11,
            ..ProductData::default()
        };
        assert!(matches!(
            validate_product(&too_many_layers),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_layers() {
        assert!(validate_layers(0).is_ok());
        assert!(validate_layers(10).is_ok());
        assert!(validate_layers(-1).is_err());
    }

    #[test]
    fn test_validate_supplier() {
        assert!(validate_supplier(&NewSupplier::new("Staples", "Staples")).is_ok());
        assert!(validate_supplier(&NewSupplier::new("Nemlig.com", "")).is_ok());
        assert_eq!(
            validate_supplier(&NewSupplier::new("", "Coop")),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_supplier(&NewSupplier::new("x".repeat(101), "Coop")).is_err());
    }
}
