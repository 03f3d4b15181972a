//! # Unit-Price Calculations
//!
//! Fills in the derived fields of a product entry form.
//!
//! ## Derivation Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  roll_sheets ─┬─► roll_length (m)  ◄─► sheet_length (mm)                │
//! │               │                                                         │
//! │  package_rolls┼─► package_weight   ◄─► roll_weight                      │
//! │               │                                                         │
//! │  package_price┴─► roll_price   = price / rolls                          │
//! │                   sheet_price  = price / (rolls × sheets)               │
//! │                   meter_price  = price / (rolls × roll_length)          │
//! │                   kilo_price   = price / package_weight                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Open Fields
//! A target is *open* when it is zero or already flagged as calculated.
//! Only open targets are written, so a value the user typed is never
//! overwritten. Every written target gets its `*_c` flag set.
//!
//! Pair derivations (length, weight) only start from a user-entered value:
//! a calculated roll length never feeds back into the sheet length.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::ProductData;

/// A field written by [`ProductData::calculate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum DerivedField {
    SheetLength,
    RollLength,
    PackageWeight,
    RollWeight,
    RollPrice,
    SheetPrice,
    MeterPrice,
    KiloPrice,
}

#[inline]
fn is_open(value: f64, calculated: bool) -> bool {
    calculated || value == 0.0
}

#[inline]
fn is_entered(value: f64, calculated: bool) -> bool {
    !calculated && value > 0.0
}

impl ProductData {
    /// Derives every open field that has positive inputs.
    ///
    /// ## Returns
    /// The fields that were written, in derivation order.
    ///
    /// ## Example
    /// ```rust
    /// use paperroll_core::{DerivedField, ProductData};
    ///
    /// let mut form = ProductData {
    ///     package_rolls: 8,
    ///     package_weight: 1.2,
    ///     package_price: 24.0,
    ///     ..ProductData::default()
    /// };
    ///
    /// let derived = form.calculate();
    /// assert_eq!(derived, vec![DerivedField::RollWeight, DerivedField::RollPrice, DerivedField::KiloPrice]);
    /// assert_eq!(form.roll_price, 3.0);
    /// assert_eq!(form.kilo_price, 20.0);
    /// ```
    pub fn calculate(&mut self) -> Vec<DerivedField> {
        let mut derived = Vec::new();

        self.derive_lengths(&mut derived);
        self.derive_weights(&mut derived);
        self.derive_prices(&mut derived);

        derived
    }

    fn derive_lengths(&mut self, derived: &mut Vec<DerivedField>) {
        if self.roll_sheets <= 0 {
            return;
        }
        let sheets = self.roll_sheets as f64;

        if is_entered(self.sheet_length as f64, self.sheet_length_c)
            && is_open(self.roll_length, self.roll_length_c)
        {
            self.roll_length = sheets * self.sheet_length as f64 / 1000.0;
            self.roll_length_c = true;
            derived.push(DerivedField::RollLength);
        } else if is_entered(self.roll_length, self.roll_length_c)
            && is_open(self.sheet_length as f64, self.sheet_length_c)
        {
            self.sheet_length = (self.roll_length * 1000.0 / sheets).round() as i64;
            self.sheet_length_c = true;
            derived.push(DerivedField::SheetLength);
        }
    }

    fn derive_weights(&mut self, derived: &mut Vec<DerivedField>) {
        if self.package_rolls <= 0 {
            return;
        }
        let rolls = self.package_rolls as f64;

        if is_entered(self.roll_weight, self.roll_weight_c)
            && is_open(self.package_weight, self.package_weight_c)
        {
            self.package_weight = self.roll_weight * rolls;
            self.package_weight_c = true;
            derived.push(DerivedField::PackageWeight);
        } else if is_entered(self.package_weight, self.package_weight_c)
            && is_open(self.roll_weight, self.roll_weight_c)
        {
            self.roll_weight = self.package_weight / rolls;
            self.roll_weight_c = true;
            derived.push(DerivedField::RollWeight);
        }
    }

    fn derive_prices(&mut self, derived: &mut Vec<DerivedField>) {
        let price = self.package_price;
        if price <= 0.0 {
            return;
        }

        if self.package_rolls > 0 {
            let rolls = self.package_rolls as f64;

            if is_open(self.roll_price, self.roll_price_c) {
                self.roll_price = price / rolls;
                self.roll_price_c = true;
                derived.push(DerivedField::RollPrice);
            }

            if self.roll_sheets > 0 && is_open(self.sheet_price, self.sheet_price_c) {
                self.sheet_price = price / (rolls * self.roll_sheets as f64);
                self.sheet_price_c = true;
                derived.push(DerivedField::SheetPrice);
            }

            if self.roll_length > 0.0 && is_open(self.meter_price, self.meter_price_c) {
                self.meter_price = price / (rolls * self.roll_length);
                self.meter_price_c = true;
                derived.push(DerivedField::MeterPrice);
            }
        }

        if self.package_weight > 0.0 && is_open(self.kilo_price, self.kilo_price_c) {
            self.kilo_price = price / self.package_weight;
            self.kilo_price_c = true;
            derived.push(DerivedField::KiloPrice);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
