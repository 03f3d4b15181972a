//! # Seed Data
//!
//! One-time population of an empty store.
//!
//! ## Load Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        load_initial_data()                              │
//! │                                                                         │
//! │  ensure_schema()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COUNT(SUPPLIER) ──► > 0 ──► Err(AlreadySeeded { SUPPLIER, count })    │
//! │       │ = 0                                                             │
//! │       ▼                                                                 │
//! │  SupplierSource ──► insert row by row                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COUNT(PRODUCT)  ──► > 0 ──► Err(AlreadySeeded { PRODUCT, count })     │
//! │       │ = 0                                                             │
//! │       ▼                                                                 │
//! │  ProductSource ──► parse ──► insert, stop at the first bad row         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SeedReport { suppliers, products }                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no wrapping transaction. When a row fails part-way, the rows
//! before it stay stored and nothing after it is inserted.
//!
//! ## Sources
//! Both tables read from a trait object, so tests can hand in a `Vec` of
//! fixtures instead of the built-in list or the bundled CSV.

use std::fmt;
use std::fs::File;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use paperroll_core::{NewSupplier, ProductColumn, ProductData};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult, SeedError};
use crate::migrations;
use crate::pool::Database;

// =============================================================================
// Sources
// =============================================================================

/// Something that can list the suppliers to seed.
pub trait SupplierSource {
    fn suppliers(&self) -> Vec<NewSupplier>;
}

/// Something that can produce the products to seed.
///
/// Rows are produced lazily; the first `Err` ends the load.
pub trait ProductSource {
    fn products(&self) -> Box<dyn Iterator<Item = Result<ProductData, SeedError>> + Send + '_>;
}

impl SupplierSource for [NewSupplier] {
    fn suppliers(&self) -> Vec<NewSupplier> {
        self.to_vec()
    }
}

impl SupplierSource for Vec<NewSupplier> {
    fn suppliers(&self) -> Vec<NewSupplier> {
        self.clone()
    }
}

impl ProductSource for [ProductData] {
    fn products(&self) -> Box<dyn Iterator<Item = Result<ProductData, SeedError>> + Send + '_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}

impl ProductSource for Vec<ProductData> {
    fn products(&self) -> Box<dyn Iterator<Item = Result<ProductData, SeedError>> + Send + '_> {
        self.as_slice().products()
    }
}

// =============================================================================
// Built-in Suppliers
// =============================================================================

/// The shops every new install starts with: (name, chain).
const BUILTIN_SUPPLIERS: [(&str, &str); 11] = [
    ("Bilka Hillerød", "Salling"),
    ("Føtex Hillerød", "Salling"),
    ("Kvickly Helsinge", "Coop"),
    ("Nemlig.com", "Nemlig"),
    ("Netto Vejby", "Salling"),
    ("Rema Vejby", "REMA 1000"),
    ("Staples", "Staples"),
    ("Spar Karsemose", "Dagrofa"),
    ("Spar Vejby Strand", "Dagrofa"),
    ("SuperBest Allerød", "SuperBest"),
    ("Superbrugsen Gilleleje", "Coop"),
];

/// The fixed list of shops shipped with the app.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSuppliers;

impl SupplierSource for BuiltinSuppliers {
    fn suppliers(&self) -> Vec<NewSupplier> {
        BUILTIN_SUPPLIERS
            .iter()
            .map(|(name, chain)| NewSupplier::new(*name, *chain))
            .collect()
    }
}

// =============================================================================
// CSV Products
// =============================================================================

/// The product list compiled into the binary.
static BUNDLED_PRODUCTS: &[u8] = include_bytes!("../../../assets/products.csv");

/// CSV columns in file order.
///
/// Decimal columns are `ROLL_LENGTH` and the price/weight columns; every
/// other numeric column, the `*_C` flags included, is an integer.
pub const CSV_COLUMNS: [ProductColumn; 27] = [
    ProductColumn::ItemNo,
    ProductColumn::Brand,
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
];

#[derive(Debug, Clone)]
enum CsvInput {
    Bundled,
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// Products read from a CSV file with one header line and 27 fields per
/// row (see [`CSV_COLUMNS`]).
///
/// ## Unreadable Files
/// A file that cannot be opened or read yields no rows and a WARN log
/// line, so the seed step reports zero products instead of failing.
/// Use [`CsvProducts::open`] to fail on a missing file instead.
#[derive(Debug, Clone)]
pub struct CsvProducts {
    input: CsvInput,
}

impl CsvProducts {
    /// The asset compiled into the crate.
    pub fn bundled() -> Self {
        CsvProducts {
            input: CsvInput::Bundled,
        }
    }

    /// A file read lazily when seeding starts.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        CsvProducts {
            input: CsvInput::File(path.into()),
        }
    }

    /// A file read right away.
    ///
    /// ## Returns
    /// * `Err(SeedError::AssetUnavailable)` - The file cannot be read
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| SeedError::AssetUnavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_bytes(bytes))
    }

    /// CSV text held in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        CsvProducts {
            input: CsvInput::Bytes(bytes.into()),
        }
    }
}

impl ProductSource for CsvProducts {
    fn products(&self) -> Box<dyn Iterator<Item = Result<ProductData, SeedError>> + Send + '_> {
        match &self.input {
            CsvInput::Bundled => Box::new(CsvRows::new(Cursor::new(BUNDLED_PRODUCTS))),
            CsvInput::Bytes(bytes) => Box::new(CsvRows::new(Cursor::new(bytes.as_slice()))),
            CsvInput::File(path) => match File::open(path) {
                Ok(file) => Box::new(CsvRows::new(file)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Seed CSV unreadable, no products loaded");
                    Box::new(std::iter::empty())
                }
            },
        }
    }
}

/// Lazily parsed CSV rows. Stops after the first error.
struct CsvRows<R> {
    reader: csv::Reader<R>,
    record: StringRecord,
    done: bool,
}

impl<R: io::Read> CsvRows<R> {
    fn new(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::None)
            .from_reader(input);

        CsvRows {
            reader,
            record: StringRecord::new(),
            done: false,
        }
    }
}

impl<R: io::Read> Iterator for CsvRows<R> {
    type Item = Result<ProductData, SeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_record(&mut self.record) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => {
                let line = self.record.position().map_or(0, |p| p.line());
                let row = parse_row(&self.record, line);
                if row.is_err() {
                    self.done = true;
                }
                Some(row)
            }
            Err(e) => {
                self.done = true;
                let line = e.position().map_or(0, |p| p.line());
                if let csv::ErrorKind::Io(io_err) = e.kind() {
                    warn!(line, error = %io_err, "Seed CSV read failed, remaining products skipped");
                    return None;
                }
                Some(Err(SeedError::Malformed {
                    line,
                    reason: e.to_string(),
                }))
            }
        }
    }
}

/// One CSV row, with its line number for error reports.
struct Fields<'a> {
    record: &'a StringRecord,
    line: u64,
}

impl Fields<'_> {
    fn raw(&self, index: usize) -> &str {
        self.record.get(index).unwrap_or_default()
    }

    fn malformed(&self, index: usize) -> SeedError {
        SeedError::MalformedNumber {
            line: self.line,
            field: CSV_COLUMNS[index].name(),
            value: self.raw(index).to_string(),
        }
    }

    fn text(&self, index: usize) -> String {
        self.raw(index).to_string()
    }

    fn int(&self, index: usize) -> Result<i64, SeedError> {
        self.raw(index).parse().map_err(|_| self.malformed(index))
    }

    fn flag(&self, index: usize) -> Result<bool, SeedError> {
        Ok(self.int(index)? != 0)
    }

    fn real(&self, index: usize) -> Result<f64, SeedError> {
        match self.raw(index).parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.malformed(index)),
        }
    }
}

fn parse_row(record: &StringRecord, line: u64) -> Result<ProductData, SeedError> {
    if record.len() != CSV_COLUMNS.len() {
        return Err(SeedError::Malformed {
            line,
            reason: format!(
                "expected {} fields, found {}",
                CSV_COLUMNS.len(),
                record.len()
            ),
        });
    }

    let f = Fields { record, line };
    Ok(ProductData {
        item_no: f.text(0),
        brand: f.text(1),
        layers: f.int(2)?,
        package_rolls: f.int(3)?,
        roll_sheets: f.int(4)?,
        sheet_width: f.int(5)?,
        sheet_length: f.int(6)?,
        sheet_length_c: f.flag(7)?,
        roll_length: f.real(8)?,
        roll_length_c: f.flag(9)?,
        package_price: f.real(10)?,
        roll_price: f.real(11)?,
        roll_price_c: f.flag(12)?,
        paper_weight: f.real(13)?,
        paper_weight_c: f.flag(14)?,
        package_weight: f.real(15)?,
        package_weight_c: f.flag(16)?,
        roll_weight: f.real(17)?,
        roll_weight_c: f.flag(18)?,
        kilo_price: f.real(19)?,
        kilo_price_c: f.flag(20)?,
        meter_price: f.real(21)?,
        meter_price_c: f.flag(22)?,
        sheet_price: f.real(23)?,
        sheet_price_c: f.flag(24)?,
        supplier: f.text(25),
        comments: f.text(26),
    })
}

// =============================================================================
// Seeding
// =============================================================================

/// Rows inserted by [`load_initial_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub suppliers: usize,
    pub products: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} suppliers and {} products loaded",
            self.suppliers, self.products
        )
    }
}

/// Inserts every supplier from `source` into an empty `SUPPLIER` table.
///
/// ## Returns
/// * `Ok(n)` - Rows inserted
/// * `Err(DbError::AlreadySeeded)` - The table already had rows; nothing changed
pub async fn seed_suppliers<S>(db: &Database, source: &S) -> DbResult<usize>
where
    S: SupplierSource + ?Sized,
{
    let repo = db.suppliers();

    let existing = repo.count().await?;
    if existing > 0 {
        return Err(DbError::already_seeded("SUPPLIER", existing));
    }

    let mut inserted = 0;
    for supplier in source.suppliers() {
        repo.insert(&supplier).await?;
        inserted += 1;
    }

    info!(inserted, "Suppliers seeded");
    Ok(inserted)
}

/// Inserts every product from `source` into an empty `PRODUCT` table.
///
/// Stops at the first row that fails to parse or insert.
pub async fn seed_products<P>(db: &Database, source: &P) -> DbResult<usize>
where
    P: ProductSource + ?Sized,
{
    let repo = db.products();

    let existing = repo.count().await?;
    if existing > 0 {
        return Err(DbError::already_seeded("PRODUCT", existing));
    }

    let mut inserted = 0;
    for row in source.products() {
        let product = row?;
        let uid = repo.insert(&product).await?;
        debug!(uid, brand = %product.brand, "Seeded product");
        inserted += 1;
    }

    info!(inserted, "Products seeded");
    Ok(inserted)
}

/// Creates the schema and seeds both tables.
///
/// The supplier check runs first; when it fails the product table is not
/// examined.
pub async fn load_initial_data<S, P>(
    db: &Database,
    suppliers: &S,
    products: &P,
) -> DbResult<SeedReport>
where
    S: SupplierSource + ?Sized,
    P: ProductSource + ?Sized,
{
    migrations::ensure_schema(db.pool()).await?;

    let report = SeedReport {
        suppliers: seed_suppliers(db, suppliers).await?,
        products: seed_products(db, products).await?,
    };

    info!(%report, "Initial data loaded");
    Ok(report)
}

// =============================================================================
// Unit Tests
// =============================================================================
