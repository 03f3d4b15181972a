//! # Seed Tool
//!
//! Creates a store and runs the one-time initial load.
//!
//! ## Usage
//! ```bash
//! # Seed the database named in the config (or the platform default)
//! cargo run -p paperroll-db --bin seed
//!
//! # Specific database file and product CSV
//! cargo run -p paperroll-db --bin seed -- --db ./paperroll.db --csv ./products.csv
//!
//! # Wipe the store first, then print the kilo-price ranking
//! cargo run -p paperroll-db --bin seed -- --reset --top KILO_PRICE
//! ```
//!
//! Set `RUST_LOG=debug` to see every statement.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use paperroll_core::{ProductColumn, SupplierFilter};
use paperroll_db::{AppConfig, CsvProducts, Database, DbError, Notice};
use tracing_subscriber::EnvFilter;

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    db: Option<PathBuf>,
    csv: Option<PathBuf>,
    reset: bool,
    top: Option<String>,
    supplier: Option<String>,
}

fn print_help() {
    println!("Paperroll Seed Tool");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>     Config file (default: platform config dir)");
    println!("  -d, --db <PATH>         Database file path");
    println!("      --csv <PATH>        Product CSV (default: bundled asset)");
    println!("      --reset             Drop all tables before seeding");
    println!("  -t, --top <COLUMN>      Print products sorted descending by COLUMN");
    println!("  -s, --supplier <NAME>   Restrict --top to one supplier (default: ALL)");
    println!("  -h, --help              Show this help message");
}

/// Returns `None` when help was printed.
fn parse_args() -> Option<Args> {
    let argv: Vec<String> = env::args().collect();
    let mut args = Args::default();

    let mut i = 1;
    while i < argv.len() {
        let value = argv.get(i + 1).cloned();
        match argv[i].as_str() {
            "-c" | "--config" => {
                args.config = value.map(PathBuf::from);
                i += 1;
            }
            "-d" | "--db" => {
                args.db = value.map(PathBuf::from);
                i += 1;
            }
            "--csv" => {
                args.csv = value.map(PathBuf::from);
                i += 1;
            }
            "-t" | "--top" => {
                args.top = value;
                i += 1;
            }
            "-s" | "--supplier" => {
                args.supplier = value;
                i += 1;
            }
            "--reset" => args.reset = true,
            "-h" | "--help" => {
                print_help();
                return None;
            }
            other => eprintln!("⚠ Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    Some(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,paperroll=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let Some(args) = parse_args() else {
        return ExitCode::SUCCESS;
    };

    init_tracing();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(notice) => {
            eprintln!();
            eprintln!("✗ [{:?}] {}", notice.code, notice);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Notice> {
    let mut config = AppConfig::load(args.config.clone())
        .map_err(|e| Notice::new(paperroll_db::NoticeCode::Invalid, e.to_string()))?;

    if let Some(db) = args.db {
        config.database.path = db;
    }
    if let Some(csv) = args.csv {
        config.seed.products_csv = Some(csv);
    }

    // Parse before touching the store so a typo changes nothing
    let top = args
        .top
        .as_deref()
        .map(str::parse::<ProductColumn>)
        .transpose()?;

    println!("🧻 Paperroll Seed Tool");
    println!("======================");
    println!("Database: {}", config.database.path.display());
    match &config.seed.products_csv {
        Some(path) => println!("Products: {}", path.display()),
        None => println!("Products: bundled asset"),
    }
    println!();

    let db = Database::new(config.db_config()).await?;
    println!("✓ Connected to database");

    if args.reset {
        db.reset_schema().await?;
        println!("✓ Schema reset");
    }

    let (embedded, applied) = db.migration_status().await?;
    println!("✓ Migrations applied ({applied}/{embedded})");

    let products: CsvProducts = config.product_source().map_err(DbError::from)?;
    let suppliers = config.supplier_source();

    match db.load_initial_data(&suppliers, &products).await {
        Ok(report) => println!("✓ {report}"),
        Err(err @ DbError::AlreadySeeded { .. }) => {
            println!("⚠ {}", Notice::from(err));
            println!("  Use --reset to start over.");
        }
        Err(err) => return Err(err.into()),
    }

    if let Some(column) = top {
        let filter: SupplierFilter = args
            .supplier
            .as_deref()
            .unwrap_or(paperroll_core::ALL_SUPPLIERS)
            .parse()
            .unwrap_or_default();

        println!();
        println!("Top by {column} ({filter}):");
        for product in db.products().find_sorted(column, &filter).await? {
            println!(
                "  {:>4}  {:<32} {:<20} {}",
                product.uid,
                product.data.brand,
                product.data.supplier,
                format_value(&product, column)
            );
        }
    }

    db.close().await;
    println!();
    println!("✓ Done!");
    Ok(())
}

/// Formats the ranked column for one product.
fn format_value(product: &paperroll_core::Product, column: ProductColumn) -> String {
    use ProductColumn as C;

    let d = &product.data;
    match column {
        C::Uid => product.uid.to_string(),
        C::Layers => d.layers.to_string(),
        C::PackageRolls => d.package_rolls.to_string(),
        C::RollSheets => d.roll_sheets.to_string(),
        C::SheetWidth => d.sheet_width.to_string(),
        C::SheetLength => d.sheet_length.to_string(),
        C::RollLength => format!("{:.3}", d.roll_length),
        C::PackagePrice => format!("{:.2}", d.package_price),
        C::RollPrice => format!("{:.2}", d.roll_price),
        C::PaperWeight => format!("{:.1}", d.paper_weight),
        C::PackageWeight => format!("{:.3}", d.package_weight),
        C::RollWeight => format!("{:.3}", d.roll_weight),
        C::KiloPrice => format!("{:.2}", d.kilo_price),
        C::MeterPrice => format!("{:.4}", d.meter_price),
        C::SheetPrice => format!("{:.5}", d.sheet_price),
        C::Supplier => d.supplier.clone(),
        C::Comments => d.comments.clone(),
        C::ItemNo => d.item_no.clone(),
        C::Brand => d.brand.clone(),
        C::TimeStamp => product.time_stamp.to_rfc3339(),
        C::SheetLengthC => d.sheet_length_c.to_string(),
        C::RollLengthC => d.roll_length_c.to_string(),
        C::RollPriceC => d.roll_price_c.to_string(),
        C::PaperWeightC => d.paper_weight_c.to_string(),
        C::PackageWeightC => d.package_weight_c.to_string(),
        C::RollWeightC => d.roll_weight_c.to_string(),
        C::KiloPriceC => d.kilo_price_c.to_string(),
        C::MeterPriceC => d.meter_price_c.to_string(),
        C::SheetPriceC => d.sheet_price_c.to_string(),
    }
}
