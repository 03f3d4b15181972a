//! End-to-end behaviour of the store: seeding, lookups, ranking, deletes.

use std::io::Write;

use paperroll_core::{
    NewSupplier, ProductColumn, ProductData, ProductFilter, SupplierColumn, SupplierFilter,
};
use paperroll_db::seed::{seed_products, seed_suppliers};
use paperroll_db::{
    BuiltinSuppliers, CsvProducts, Database, DbConfig, DbError, Notice, NoticeCode, SeedError,
};

const HEADER: &str = "item_no,brand,layers,package_rolls,roll_sheets,sheet_width,sheet_length,sheet_length_c,roll_length,roll_length_c,package_price,roll_price,roll_price_c,paper_weight,paper_weight_c,package_weight,package_weight_c,roll_weight,roll_weight_c,kilo_price,kilo_price_c,meter_price,meter_price_c,sheet_price,sheet_price_c,supplier,comments";

async fn db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

fn row(item_no: &str, brand: &str, rolls: &str, price: &str, supplier: &str) -> String {
    format!(
        "{item_no},{brand},3,{rolls},255,97,125,0,31.875,1,{price},0,0,0,0,0,0,0,0,0,0,0,0,0,0,{supplier},"
    )
}

fn csv_source(rows: &[String]) -> CsvProducts {
    let mut text = String::from(HEADER);
    for r in rows {
        text.push('\n');
        text.push_str(r);
    }
    text.push('\n');
    CsvProducts::from_bytes(text)
}

fn lambi() -> ProductData {
    let mut form = ProductData {
        item_no: "170190".to_string(),
        brand: "Lambi Classic 9".to_string(),
        layers: 3,
        package_rolls: 9,
        roll_sheets: 255,
        sheet_length: 125,
        package_price: 34.95,
        supplier: "Rema Vejby".to_string(),
        comments: "Produceret i Sverige".to_string(),
        ..ProductData::default()
    };
    form.calculate();
    form
}

// =============================================================================
// Seeding
// =============================================================================

#[tokio::test]
async fn initial_load_seeds_both_tables() {
    let db = db().await;
    let products = CsvProducts::bundled();

    let report = db
        .load_initial_data(&BuiltinSuppliers, &products)
        .await
        .unwrap();

    assert_eq!(report.suppliers, 11);
    assert_eq!(report.products as i64, db.products().count().await.unwrap());
    assert!(report.products > 0);
    assert_eq!(db.suppliers().count().await.unwrap(), 11);
}

#[tokio::test]
async fn reseeding_fails_with_existing_count_and_keeps_rows() {
    let db = db().await;
    let products = csv_source(&[
        row("1", "A", "8", "10.0", "Bilka"),
        row("2", "B", "8", "20.0", "Bilka"),
    ]);
    db.load_initial_data(&BuiltinSuppliers, &products)
        .await
        .unwrap();

    let before = db.products().all().await.unwrap();

    // Supplier check runs first
    let err = db
        .load_initial_data(&BuiltinSuppliers, &products)
        .await
        .unwrap_err();
    match &err {
        DbError::AlreadySeeded { table, count } => {
            assert_eq!(table, "SUPPLIER");
            assert_eq!(*count, 11);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(Notice::from(&err).code, NoticeCode::AlreadySeeded);

    // Product table on its own
    let err = seed_products(&db, &products).await.unwrap_err();
    assert!(matches!(err, DbError::AlreadySeeded { ref table, count: 2 } if table == "PRODUCT"));

    assert_eq!(db.products().all().await.unwrap(), before);
    assert_eq!(db.suppliers().count().await.unwrap(), 11);
}

#[tokio::test]
async fn supplier_seed_refuses_when_user_added_one() {
    let db = db().await;
    db.suppliers()
        .insert(&NewSupplier::new("Lidl Hillerød", "Lidl"))
        .await
        .unwrap();

    let err = seed_suppliers(&db, &BuiltinSuppliers).await.unwrap_err();
    assert!(matches!(err, DbError::AlreadySeeded { count: 1, .. }));
    assert_eq!(db.suppliers().count().await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_number_aborts_and_is_reported() {
    let db = db().await;
    let products = csv_source(&[
        row("1", "First", "8", "10.0", "Bilka"),
        row("2", "Broken", "8", "ten", "Bilka"),
        row("3", "Never", "8", "30.0", "Bilka"),
    ]);

    let err = seed_products(&db, &products).await.unwrap_err();
    match err {
        DbError::Seed(SeedError::MalformedNumber { line, field, value }) => {
            assert_eq!(line, 3);
            assert_eq!(field, "PACKAGE_PRICE");
            assert_eq!(value, "ten");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Rows before the bad one stay; nothing after it is inserted
    let stored = db.products().all().await.unwrap();
    let brands: Vec<&str> = stored.iter().map(|p| p.data.brand.as_str()).collect();
    assert_eq!(brands, vec!["First"]);
}

#[tokio::test]
async fn unreadable_csv_loads_zero_products() {
    let db = db().await;
    let report = db
        .load_initial_data(
            &BuiltinSuppliers,
            &CsvProducts::from_path("/nonexistent/products.csv"),
        )
        .await
        .unwrap();

    assert_eq!(report.suppliers, 11);
    assert_eq!(report.products, 0);
}

#[tokio::test]
async fn csv_file_on_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "{}", row("5705830002242", "REMA 1000", "8", "9.75", "Rema Vejby")).unwrap();
    file.flush().unwrap();

    let db = db().await;
    let inserted = seed_products(&db, &CsvProducts::open(file.path()).unwrap())
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    let found = db
        .products()
        .find(&ProductFilter::by_item_no("5705830002242"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].data.package_price, 9.75);
}

#[tokio::test]
async fn fixture_sources() {
    let db = db().await;
    let suppliers = vec![NewSupplier::new("Test Shop", "Test Chain")];
    let products = vec![lambi(), lambi()];

    let report = db.load_initial_data(&suppliers, &products).await.unwrap();
    assert_eq!((report.suppliers, report.products), (1, 2));
}

// =============================================================================
// Repository
// =============================================================================

#[tokio::test]
async fn insert_then_fetch_round_trips() {
    let db = db().await;
    let data = lambi();

    let uid = db.products().insert(&data).await.unwrap();
    let stored = db.products().get_by_uid(uid).await.unwrap().unwrap();

    assert_eq!(stored.uid, uid);
    assert_eq!(stored.data, data);
}

#[tokio::test]
async fn whole_decimals_round_trip_as_decimals() {
    let db = db().await;
    let data = ProductData {
        package_price: 30.0,
        roll_length: 25.0,
        ..ProductData::default()
    };

    let uid = db.products().insert(&data).await.unwrap();
    let stored = db.products().get_by_uid(uid).await.unwrap().unwrap();
    assert_eq!(stored.data, data);
}

#[tokio::test]
async fn duplicate_item_numbers_are_allowed() {
    let db = db().await;
    db.products().insert(&lambi()).await.unwrap();
    db.products().insert(&lambi()).await.unwrap();

    let found = db
        .products()
        .find(&ProductFilter::by_item_no("170190"))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_ne!(found[0].uid, found[1].uid);
}

#[tokio::test]
async fn deleting_missing_rows_is_a_noop() {
    let db = db().await;
    db.load_initial_data(&BuiltinSuppliers, &vec![lambi()])
        .await
        .unwrap();

    assert_eq!(db.products().delete(9_999).await.unwrap(), 0);
    assert_eq!(db.suppliers().delete("Nowhere").await.unwrap(), 0);
    assert_eq!(db.products().count().await.unwrap(), 1);
    assert_eq!(db.suppliers().count().await.unwrap(), 11);
}

#[tokio::test]
async fn deleted_uids_are_not_reused() {
    let db = db().await;
    let first = db.products().insert(&lambi()).await.unwrap();
    db.products().delete(first).await.unwrap();

    let second = db.products().insert(&lambi()).await.unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn price_ranking_all_and_by_supplier() {
    let db = db().await;
    let products = csv_source(&[
        row("1", "Cheap", "8", "12.5", "Bilka"),
        row("2", "Dear", "8", "49.0", "Rema Vejby"),
        row("3", "Middle", "8", "30.0", "Bilka"),
        row("4", "Other", "8", "35.0", "Bilka Hillerød"),
    ]);
    seed_products(&db, &products).await.unwrap();

    let all = db
        .products()
        .find_sorted(ProductColumn::PackagePrice, &"ALL".parse().unwrap())
        .await
        .unwrap();
    let prices: Vec<f64> = all.iter().map(|p| p.data.package_price).collect();
    assert_eq!(prices, vec![49.0, 35.0, 30.0, 12.5]);

    let bilka = db
        .products()
        .find_sorted(ProductColumn::PackagePrice, &"Bilka".parse().unwrap())
        .await
        .unwrap();
    let brands: Vec<&str> = bilka.iter().map(|p| p.data.brand.as_str()).collect();
    assert_eq!(brands, vec!["Middle", "Cheap"]);
    assert!(bilka.iter().all(|p| p.is_sold_by("Bilka")));
}

#[tokio::test]
async fn ranking_by_derived_price() {
    let db = db().await;
    let mut cheap = lambi();
    cheap.brand = "Cheap per sheet".to_string();
    cheap.package_price = 20.0;
    cheap.calculate();

    db.products().insert(&lambi()).await.unwrap();
    db.products().insert(&cheap).await.unwrap();

    let ranked = db
        .products()
        .find_sorted(ProductColumn::SheetPrice, &SupplierFilter::All)
        .await
        .unwrap();
    assert_eq!(ranked[0].data.brand, "Lambi Classic 9");
    assert_eq!(ranked[1].data.brand, "Cheap per sheet");
}

#[tokio::test]
async fn duplicate_supplier_is_rejected() {
    let db = db().await;
    let suppliers = db.suppliers();

    suppliers
        .insert(&NewSupplier::new("Bilka Hillerød", "Salling"))
        .await
        .unwrap();
    let err = suppliers
        .insert(&NewSupplier::new("Bilka Hillerød", "Salling"))
        .await
        .unwrap_err();

    assert!(err.is_unique_violation());
    assert_eq!(Notice::from(&err).code, NoticeCode::Duplicate);

    let rows = suppliers
        .find(SupplierColumn::Supplier, "Bilka Hillerød")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(suppliers.count().await.unwrap(), 1);
}

#[tokio::test]
async fn supplier_lookup_reads_one_row() {
    let db = db().await;
    seed_suppliers(&db, &BuiltinSuppliers).await.unwrap();

    // Three shops belong to Salling
    let salling = db
        .suppliers()
        .find(SupplierColumn::Chain, "Salling")
        .await
        .unwrap();
    assert_eq!(salling.len(), 1);
    assert_eq!(salling[0].chain, "Salling");
}

#[tokio::test]
async fn products_with_unknown_supplier_are_kept() {
    let db = db().await;
    seed_suppliers(&db, &BuiltinSuppliers).await.unwrap();

    let mut orphan = lambi();
    orphan.supplier = "Shop that was never registered".to_string();
    db.products().insert(&orphan).await.unwrap();
    db.suppliers().delete("Rema Vejby").await.unwrap();
    db.products().insert(&lambi()).await.unwrap();

    assert_eq!(db.products().count().await.unwrap(), 2);
}

// =============================================================================
// Schema
// =============================================================================

#[tokio::test]
async fn reset_schema_drops_everything() {
    let db = db().await;
    db.load_initial_data(&BuiltinSuppliers, &CsvProducts::bundled())
        .await
        .unwrap();

    db.reset_schema().await.unwrap();

    assert_eq!(db.products().count().await.unwrap(), 0);
    assert_eq!(db.suppliers().count().await.unwrap(), 0);
    assert_eq!(db.schema_version().await.unwrap(), Some(1));

    let report = db
        .load_initial_data(&BuiltinSuppliers, &CsvProducts::bundled())
        .await
        .unwrap();
    assert_eq!(report.suppliers, 11);
}

#[tokio::test]
async fn on_disk_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paperroll.db");

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let uid = db.products().insert(&lambi()).await.unwrap();
    db.close().await;

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let stored = db.products().get_by_uid(uid).await.unwrap().unwrap();
    assert_eq!(stored.data, lambi());
    db.close().await;
}
