//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Single-column equality lookups (brand, item number, supplier, ...)
//! - Price ranking: every row, or one supplier's rows, sorted descending
//! - Insert and delete by uid (there is no update)
//!
//! ## Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a lookup is built                                │
//! │                                                                         │
//! │  ProductFilter { column: ItemNo, value: "5705830002242" }              │
//! │       │                  │                    │                         │
//! │       │      column.name() (enum)      bound as ?1                     │
//! │       ▼                  ▼                    ▼                         │
//! │  SELECT ... FROM PRODUCT WHERE ITEM_NO = ?1 [ORDER BY BRAND ASC]       │
//! │                                                                         │
//! │  One table, one predicate, one statement. No joins.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use paperroll_core::validation::validate_product;
use paperroll_core::{
    FilterValue, Product, ProductColumn, ProductData, ProductFilter, SortDirection,
    SupplierFilter, DEFAULT_PRODUCT_ORDER,
};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::debug;

use super::rows::{product_from_row, product_select};
use crate::error::DbResult;

const INSERT_PRODUCT: &str = r#"
    INSERT INTO PRODUCT (
        LAYERS, PACKAGE_ROLLS, ROLL_SHEETS, SHEET_WIDTH,
        SHEET_LENGTH, SHEET_LENGTH_C, ROLL_LENGTH, ROLL_LENGTH_C,
        PACKAGE_PRICE, ROLL_PRICE, ROLL_PRICE_C,
        PAPER_WEIGHT, PAPER_WEIGHT_C, PACKAGE_WEIGHT, PACKAGE_WEIGHT_C,
        ROLL_WEIGHT, ROLL_WEIGHT_C, KILO_PRICE, KILO_PRICE_C,
        METER_PRICE, METER_PRICE_C, SHEET_PRICE, SHEET_PRICE_C,
        SUPPLIER, COMMENTS, ITEM_NO, BRAND
    ) VALUES (
        ?, ?, ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?, ?,
        ?, ?, ?, ?
    )
"#;

/// Binds a filter value to the next placeholder.
pub(crate) fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &FilterValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        FilterValue::Integer(v) => query.bind(*v),
        FilterValue::Real(v) => query.bind(*v),
        FilterValue::Text(v) => query.bind(v.clone()),
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// // Every product from one shop
/// let rema = repo.find(&ProductFilter::by_supplier("Rema Vejby")).await?;
///
/// // Price ranking across all shops
/// let ranked = repo
///     .find_sorted(ProductColumn::SheetPrice, &SupplierFilter::All)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    async fn fetch(&self, sql: &str, filter: Option<&FilterValue>) -> DbResult<Vec<Product>> {
        let mut query = sqlx::query(sql);
        if let Some(value) = filter {
            query = bind_value(query, value);
        }

        let products = query
            .try_map(product_from_row)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Product query returned rows");
        Ok(products)
    }

    /// Returns every product matching a single-column equality filter.
    ///
    /// Row order is unspecified. An empty result is not an error.
    pub async fn find(&self, filter: &ProductFilter) -> DbResult<Vec<Product>> {
        debug!(filter = %filter, "Finding products");

        let sql = format!(
            "SELECT {} FROM PRODUCT WHERE {} = ?",
            product_select(),
            filter.column.name()
        );
        self.fetch(&sql, Some(&filter.value)).await
    }

    /// Like [`find`](Self::find), ordered ascending by `order`.
    pub async fn find_ordered(
        &self,
        filter: &ProductFilter,
        order: ProductColumn,
    ) -> DbResult<Vec<Product>> {
        debug!(filter = %filter, order = %order, "Finding products (ordered)");

        let sql = format!(
            "SELECT {} FROM PRODUCT WHERE {} = ? ORDER BY {} {}",
            product_select(),
            filter.column.name(),
            order.name(),
            SortDirection::Ascending.keyword()
        );
        self.fetch(&sql, Some(&filter.value)).await
    }

    /// Ranks products descending by `sort`, optionally restricted to one
    /// supplier.
    ///
    /// ## Arguments
    /// * `sort` - Column to rank by (usually one of the price columns)
    /// * `suppliers` - [`SupplierFilter::All`], or an exact supplier label
    ///
    /// Rows with equal sort values come back in insertion order.
    pub async fn find_sorted(
        &self,
        sort: ProductColumn,
        suppliers: &SupplierFilter,
    ) -> DbResult<Vec<Product>> {
        debug!(sort = %sort, suppliers = %suppliers, "Ranking products");

        let direction = SortDirection::Descending.keyword();
        match suppliers.supplier() {
            None => {
                let sql = format!(
                    "SELECT {} FROM PRODUCT ORDER BY {} {direction}, UID ASC",
                    product_select(),
                    sort.name()
                );
                self.fetch(&sql, None).await
            }
            Some(name) => {
                let sql = format!(
                    "SELECT {} FROM PRODUCT WHERE {} = ? ORDER BY {} {direction}, UID ASC",
                    product_select(),
                    ProductColumn::Supplier.name(),
                    sort.name()
                );
                self.fetch(&sql, Some(&FilterValue::from(name))).await
            }
        }
    }

    /// Returns every product ordered by brand.
    pub async fn all(&self) -> DbResult<Vec<Product>> {
        self.all_ordered_by(DEFAULT_PRODUCT_ORDER).await
    }

    /// Returns every product ordered ascending by `order`.
    pub async fn all_ordered_by(&self, order: ProductColumn) -> DbResult<Vec<Product>> {
        debug!(order = %order, "Listing products");

        let sql = format!(
            "SELECT {} FROM PRODUCT ORDER BY {} {}",
            product_select(),
            order.name(),
            SortDirection::Ascending.keyword()
        );
        self.fetch(&sql, None).await
    }

    /// Gets a product by its uid.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_uid(&self, uid: i64) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT {} FROM PRODUCT WHERE {} = ?",
            product_select(),
            ProductColumn::Uid.name()
        );

        let product = sqlx::query(&sql)
            .bind(uid)
            .try_map(product_from_row)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a product.
    ///
    /// The record is validated first. Item numbers are not required to be
    /// unique.
    ///
    /// ## Returns
    /// The store-assigned uid.
    pub async fn insert(&self, product: &ProductData) -> DbResult<i64> {
        validate_product(product)?;

        debug!(brand = %product.brand, item_no = %product.item_no, "Inserting product");

        let result = sqlx::query(INSERT_PRODUCT)
            .bind(product.layers)
            .bind(product.package_rolls)
            .bind(product.roll_sheets)
            .bind(product.sheet_width)
            .bind(product.sheet_length)
            .bind(i64::from(product.sheet_length_c))
            .bind(product.roll_length)
            .bind(i64::from(product.roll_length_c))
            .bind(product.package_price)
            .bind(product.roll_price)
            .bind(i64::from(product.roll_price_c))
            .bind(product.paper_weight)
            .bind(i64::from(product.paper_weight_c))
            .bind(product.package_weight)
            .bind(i64::from(product.package_weight_c))
            .bind(product.roll_weight)
            .bind(i64::from(product.roll_weight_c))
            .bind(product.kilo_price)
            .bind(i64::from(product.kilo_price_c))
            .bind(product.meter_price)
            .bind(i64::from(product.meter_price_c))
            .bind(product.sheet_price)
            .bind(i64::from(product.sheet_price_c))
            .bind(&product.supplier)
            .bind(&product.comments)
            .bind(&product.item_no)
            .bind(&product.brand)
            .execute(&self.pool)
            .await?;

        let uid = result.last_insert_rowid();
        debug!(uid, "Product inserted");
        Ok(uid)
    }

    /// Deletes a product by uid.
    ///
    /// ## Returns
    /// Rows affected: 1, or 0 when no such product exists.
    pub async fn delete(&self, uid: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM PRODUCT WHERE UID = ?")
            .bind(uid)
            .execute(&self.pool)
            .await?;

        debug!(uid, rows = result.rows_affected(), "Product delete");
        Ok(result.rows_affected())
    }

    /// Counts stored products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM PRODUCT")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
