//! # Configuration
//!
//! Settings for opening and seeding a store, read from `paperroll.toml`.
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. Config file (explicit path, or the platform config directory)
//! 3. Environment variables (`PAPERROLL_DB_PATH`, `PAPERROLL_SEED_CSV`)
//!
//! Only [`AppConfig::load`] reads the environment. Everything else in the
//! crate takes its settings as arguments.
//!
//! ## Example File
//! ```toml
//! [database]
//! path = "/data/paperroll.db"
//! max_connections = 4
//!
//! [seed]
//! products_csv = "/data/products.csv"
//! builtin_suppliers = true
//! ```

use std::path::PathBuf;

use paperroll_core::NewSupplier;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::SeedError;
use crate::pool::DbConfig;
use crate::seed::{BuiltinSuppliers, CsvProducts, SupplierSource};

pub const ENV_DB_PATH: &str = "PAPERROLL_DB_PATH";
pub const ENV_SEED_CSV: &str = "PAPERROLL_SEED_CSV";

/// Configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file, created on first open.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("net", "paperroll", "paperroll")
        .map(|dirs| dirs.data_dir().join("paperroll.db"))
        .unwrap_or_else(|| PathBuf::from("paperroll.db"))
}

fn default_max_connections() -> u32 {
    4
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[seed]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Product CSV to load instead of the bundled asset.
    #[serde(default)]
    pub products_csv: Option<PathBuf>,

    /// Seed the built-in shop list. When false the supplier table starts
    /// empty.
    #[serde(default = "default_true")]
    pub builtin_suppliers: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SeedSettings {
    fn default() -> Self {
        SeedSettings {
            products_csv: None,
            builtin_suppliers: true,
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub seed: SeedSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a key lookup (the process environment in
    /// [`load`](Self::load)).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(csv) = lookup(ENV_SEED_CSV) {
            debug!(csv = %csv, "Overriding seed CSV from environment");
            self.seed.products_csv = Some(PathBuf::from(csv));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("net", "paperroll", "paperroll")
            .map(|dirs| dirs.config_dir().join("paperroll.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Pool settings for [`Database::new`](crate::Database::new).
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database.path).max_connections(self.database.max_connections)
    }

    /// Suppliers to seed.
    pub fn supplier_source(&self) -> Vec<NewSupplier> {
        if self.seed.builtin_suppliers {
            BuiltinSuppliers.suppliers()
        } else {
            Vec::new()
        }
    }

    /// Products to seed.
    ///
    /// A configured file must be readable; without one the bundled asset is
    /// used.
    pub fn product_source(&self) -> Result<CsvProducts, SeedError> {
        match &self.seed.products_csv {
            Some(path) => CsvProducts::open(path),
            None => Ok(CsvProducts::bundled()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::ProductSource;
    use std::collections::HashMap;

    #[test]
    fn test_parse_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            path = "/data/paperroll.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/data/paperroll.db"));
        assert_eq!(config.database.max_connections, 4);
        assert!(config.seed.builtin_suppliers);
        assert!(config.seed.products_csv.is_none());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DB_PATH, "/tmp/override.db"),
            (ENV_SEED_CSV, "/tmp/products.csv"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, PathBuf::from("/tmp/override.db"));
        assert_eq!(
            config.seed.products_csv,
            Some(PathBuf::from("/tmp/products.csv"))
        );
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.database.max_connections = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paperroll.toml");

        let mut config = AppConfig::default();
        config.database.path = dir.path().join("store.db");
        config.seed.builtin_suppliers = false;
        config.save(Some(path.clone())).unwrap();

        let loaded: AppConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.supplier_source().is_empty());
    }

    #[test]
    fn test_sources() {
        let config = AppConfig::default();
        assert_eq!(config.supplier_source().len(), 11);
        assert!(config.product_source().unwrap().products().count() > 0);

        let mut missing = AppConfig::default();
        missing.seed.products_csv = Some(PathBuf::from("/nonexistent/products.csv"));
        assert!(matches!(
            missing.product_source(),
            Err(SeedError::AssetUnavailable(_))
        ));
    }
}
