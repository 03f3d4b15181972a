//! Row mapping shared by the repositories.
//!
//! Columns are read by name through [`ProductColumn::name`], never by
//! position. NULL numbers read as zero and NULL text as the empty string.
//!
//! `NUMERIC` affinity stores a whole decimal such as `3.0` as the integer
//! `3`, so decimal columns are cast back to `REAL` in the select list.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use paperroll_core::{
    ColumnKind, Product, ProductColumn, ProductData, Supplier, SupplierColumn,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Select expression for one product column.
fn select_expr(column: ProductColumn) -> String {
    let name = column.name();
    match column.kind() {
        ColumnKind::Real => format!("CAST({name} AS REAL) AS {name}"),
        ColumnKind::Timestamp => format!("CAST({name} AS TEXT) AS {name}"),
        ColumnKind::Integer | ColumnKind::Flag | ColumnKind::Text => name.to_string(),
    }
}

/// Select list for every `PRODUCT` query, built once from the column kinds.
pub(crate) fn product_select() -> &'static str {
    static SELECT: OnceLock<String> = OnceLock::new();
    SELECT.get_or_init(|| {
        ProductColumn::ALL
            .into_iter()
            .map(select_expr)
            .collect::<Vec<_>>()
            .join(", ")
    })
}

/// Select list for every `SUPPLIER` query.
pub(crate) const SUPPLIER_SELECT: &str =
    "SUPPLIER, CHAIN, CAST(TIME_STAMP AS TEXT) AS TIME_STAMP";

/// Format SQLite writes for `CURRENT_TIMESTAMP`.
const SQLITE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

fn int(row: &SqliteRow, column: ProductColumn) -> Result<i64, sqlx::Error> {
    debug_assert!(matches!(column.kind(), ColumnKind::Integer | ColumnKind::Flag));
    Ok(row.try_get::<Option<i64>, _>(column.name())?.unwrap_or(0))
}

fn real(row: &SqliteRow, column: ProductColumn) -> Result<f64, sqlx::Error> {
    debug_assert_eq!(column.kind(), ColumnKind::Real);
    Ok(row.try_get::<Option<f64>, _>(column.name())?.unwrap_or(0.0))
}

fn flag(row: &SqliteRow, column: ProductColumn) -> Result<bool, sqlx::Error> {
    debug_assert_eq!(column.kind(), ColumnKind::Flag);
    Ok(int(row, column)? != 0)
}

fn text(row: &SqliteRow, name: &str) -> Result<String, sqlx::Error> {
    Ok(row.try_get::<Option<String>, _>(name)?.unwrap_or_default())
}

fn timestamp(row: &SqliteRow, name: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let raw = row
        .try_get::<Option<String>, _>(name)?
        .ok_or_else(|| sqlx::Error::ColumnDecode {
            index: name.to_string(),
            source: "timestamp is NULL".into(),
        })?;

    parse_timestamp(&raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: name.to_string(),
        source: format!("unrecognised timestamp '{raw}'").into(),
    })
}

/// Parses SQLite's `CURRENT_TIMESTAMP` text, or RFC 3339.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP) {
        return Some(Utc.from_utc_datetime(&naive));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub(crate) fn product_from_row(row: SqliteRow) -> Result<Product, sqlx::Error> {
    use ProductColumn as C;

    let data = ProductData {
        layers: int(&row, C::Layers)?,
        package_rolls: int(&row, C::PackageRolls)?,
        roll_sheets: int(&row, C::RollSheets)?,
        sheet_width: int(&row, C::SheetWidth)?,
        sheet_length: int(&row, C::SheetLength)?,
        sheet_length_c: flag(&row, C::SheetLengthC)?,
        roll_length: real(&row, C::RollLength)?,
        roll_length_c: flag(&row, C::RollLengthC)?,
        package_price: real(&row, C::PackagePrice)?,
        roll_price: real(&row, C::RollPrice)?,
        roll_price_c: flag(&row, C::RollPriceC)?,
        paper_weight: real(&row, C::PaperWeight)?,
        paper_weight_c: flag(&row, C::PaperWeightC)?,
        package_weight: real(&row, C::PackageWeight)?,
        package_weight_c: flag(&row, C::PackageWeightC)?,
        roll_weight: real(&row, C::RollWeight)?,
        roll_weight_c: flag(&row, C::RollWeightC)?,
        kilo_price: real(&row, C::KiloPrice)?,
        kilo_price_c: flag(&row, C::KiloPriceC)?,
        meter_price: real(&row, C::MeterPrice)?,
        meter_price_c: flag(&row, C::MeterPriceC)?,
        sheet_price: real(&row, C::SheetPrice)?,
        sheet_price_c: flag(&row, C::SheetPriceC)?,
        supplier: text(&row, C::Supplier.name())?,
        comments: text(&row, C::Comments.name())?,
        item_no: text(&row, C::ItemNo.name())?,
        brand: text(&row, C::Brand.name())?,
    };

    Ok(Product {
        uid: int(&row, C::Uid)?,
        data,
        time_stamp: timestamp(&row, C::TimeStamp.name())?,
    })
}

pub(crate) fn supplier_from_row(row: SqliteRow) -> Result<Supplier, sqlx::Error> {
    Ok(Supplier {
        name: text(&row, SupplierColumn::Supplier.name())?,
        chain: text(&row, SupplierColumn::Chain.name())?,
        time_stamp: timestamp(&row, SupplierColumn::TimeStamp.name())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_select_lists_cover_every_column() {
        let select = product_select();
        for column in ProductColumn::ALL {
            assert!(
                select.contains(column.name()),
                "{column} missing from select list"
            );
        }
        for column in SupplierColumn::ALL {
            assert!(SUPPLIER_SELECT.contains(column.name()));
        }
    }

    #[test]
    fn test_select_list_casts_by_kind() {
        let select = product_select();
        assert!(select.starts_with("UID, LAYERS, "));
        assert!(select.contains("CAST(PACKAGE_PRICE AS REAL) AS PACKAGE_PRICE"));
        assert!(select.contains("CAST(TIME_STAMP AS TEXT) AS TIME_STAMP"));
        assert!(!select.contains("CAST(SHEET_LENGTH "));
        assert!(!select.contains("CAST(KILO_PRICE_C "));

        let casts = select.matches(" AS REAL)").count();
        let reals = ProductColumn::ALL
            .into_iter()
            .filter(|c| c.kind() == ColumnKind::Real)
            .count();
        assert_eq!(casts, reals);
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2017-03-04 12:30:05").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2017, 3, 4));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (12, 30, 5));

        assert!(parse_timestamp("2017-03-04T12:30:05Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
