//! # Supplier Repository
//!
//! Database operations for the shops products are bought from.
//!
//! Supplier names are the primary key. Products refer to them by free text
//! only, so deleting a supplier never touches a product.

use paperroll_core::validation::validate_supplier;
use paperroll_core::{FilterValue, NewSupplier, Supplier, SupplierColumn};
use sqlx::SqlitePool;
use tracing::debug;

use super::product::bind_value;
use super::rows::{supplier_from_row, SUPPLIER_SELECT};
use crate::error::{DbError, DbResult};

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Looks up suppliers by one column.
    ///
    /// At most ONE row is returned even when several match (for example
    /// two shops of the same chain). Callers wanting every shop of a chain
    /// should use [`all`](Self::all) and filter.
    pub async fn find(
        &self,
        column: SupplierColumn,
        value: impl Into<FilterValue>,
    ) -> DbResult<Vec<Supplier>> {
        let value = value.into();
        debug!(column = %column, value = %value, "Finding supplier");

        let sql = format!(
            "SELECT {SUPPLIER_SELECT} FROM SUPPLIER WHERE {} = ? LIMIT 1",
            column.name()
        );

        let suppliers = bind_value(sqlx::query(&sql), &value)
            .try_map(supplier_from_row)
            .fetch_all(&self.pool)
            .await?;

        Ok(suppliers)
    }

    /// Returns every supplier ordered by name.
    pub async fn all(&self) -> DbResult<Vec<Supplier>> {
        let sql = format!(
            "SELECT {SUPPLIER_SELECT} FROM SUPPLIER ORDER BY {}",
            SupplierColumn::Supplier.name()
        );

        let suppliers = sqlx::query(&sql)
            .try_map(supplier_from_row)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = suppliers.len(), "Listed suppliers");
        Ok(suppliers)
    }

    /// Inserts a supplier.
    ///
    /// ## Returns
    /// * `Ok(())` - Supplier stored
    /// * `Err(DbError::UniqueViolation)` - A supplier with this name exists
    pub async fn insert(&self, supplier: &NewSupplier) -> DbResult<()> {
        validate_supplier(supplier)?;

        debug!(name = %supplier.name, chain = %supplier.chain, "Inserting supplier");

        sqlx::query("INSERT INTO SUPPLIER (SUPPLIER, CHAIN) VALUES (?, ?)")
            .bind(&supplier.name)
            .bind(&supplier.chain)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => {
                    DbError::duplicate(SupplierColumn::Supplier.name(), &supplier.name)
                }
                other => other,
            })?;

        Ok(())
    }

    /// Deletes a supplier by name.
    ///
    /// ## Returns
    /// Rows affected: 1, or 0 when no such supplier exists.
    pub async fn delete(&self, name: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM SUPPLIER WHERE SUPPLIER = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        debug!(name, rows = result.rows_affected(), "Supplier delete");
        Ok(result.rows_affected())
    }

    /// Counts stored suppliers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM SUPPLIER")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use paperroll_core::{NewSupplier, SupplierColumn};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_find_returns_at_most_one_row() {
        let db = db().await;
        let repo = db.suppliers();

        repo.insert(&NewSupplier::new("Spar Karsemose", "Dagrofa")).await.unwrap();
        repo.insert(&NewSupplier::new("Spar Vejby Strand", "Dagrofa")).await.unwrap();

        let found = repo.find(SupplierColumn::Chain, "Dagrofa").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].chain, "Dagrofa");

        let none = repo.find(SupplierColumn::Supplier, "Lidl").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_all_is_ordered_by_name() {
        let db = db().await;
        let repo = db.suppliers();

        repo.insert(&NewSupplier::new("Staples", "Staples")).await.unwrap();
        repo.insert(&NewSupplier::new("Bilka Hillerød", "Salling")).await.unwrap();

        let names: Vec<String> = repo.all().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Bilka Hillerød", "Staples"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let db = db().await;
        let repo = db.suppliers();

        repo.insert(&NewSupplier::new("Nemlig.com", "Nemlig")).await.unwrap();
        let err = repo
            .insert(&NewSupplier::new("Nemlig.com", "Other"))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "SUPPLIER");
                assert_eq!(value, "Nemlig.com");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = db().await;
        let repo = db.suppliers();

        repo.insert(&NewSupplier::new("Rema Vejby", "REMA 1000")).await.unwrap();
        assert_eq!(repo.delete("Netto Vejby").await.unwrap(), 0);
        assert_eq!(repo.delete("Rema Vejby").await.unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
