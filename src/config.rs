//! Configuration for the database-backed access control
//!
//! Read either from a TOML file:
//!
//! ```toml
//! db-path = "/var/lib/acl/policy.db"
//! db-table = "user_catalog"
//! lookup = "indexed"
//! ```
//!
//! or from the flat key/value properties a host engine hands to a factory.
//! Both forms use the same keys.

use crate::core::evaluator::LookupMode;
use crate::core::source::SqliteSource;
use crate::core::validation::SqlIdentifier;
use crate::error::{AclError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use validator::{Validate, ValidationError};

/// Property key for the SQLite database path
pub const DB_PATH: &str = "db-path";
/// Property key for the policy table name
pub const DB_TABLE: &str = "db-table";

fn default_user_column() -> String {
    "user".to_string()
}

fn default_catalog_column() -> String {
    "catalog".to_string()
}

fn validate_identifier(value: &str) -> std::result::Result<(), ValidationError> {
    SqlIdentifier::new(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("sql_identifier"))
}

/// Where the policy table lives and how to search it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct AclConfig {
    /// SQLite database file holding the policy table
    #[validate(length(min = 1))]
    pub db_path: String,

    /// Table with one row per permitted (user, catalog) pair
    #[validate(custom(function = "validate_identifier"))]
    pub db_table: String,

    #[serde(default = "default_user_column")]
    #[validate(custom(function = "validate_identifier"))]
    pub db_user_column: String,

    #[serde(default = "default_catalog_column")]
    #[validate(custom(function = "validate_identifier"))]
    pub db_catalog_column: String,

    /// Lookup strategy for the evaluator
    #[serde(default)]
    pub lookup: LookupMode,
}

impl AclConfig {
    /// Config for `table` in the database at `db_path`, other keys defaulted
    pub fn new(db_path: impl Into<String>, db_table: impl Into<String>) -> Self {
        AclConfig {
            db_path: db_path.into(),
            db_table: db_table.into(),
            db_user_column: default_user_column(),
            db_catalog_column: default_catalog_column(),
            lookup: LookupMode::default(),
        }
    }

    /// Set the lookup mode
    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AclConfig = toml::from_str(text)?;
        config.validated()
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Build from host-supplied properties
    ///
    /// `db-path` and `db-table` are required; unknown keys are ignored.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self> {
        for key in [DB_PATH, DB_TABLE] {
            if !properties.contains_key(key) {
                return Err(AclError::Config(format!("{} must not be null", key)));
            }
        }

        let table: toml::Table = properties
            .iter()
            .map(|(key, value)| (key.clone(), toml::Value::String(value.clone())))
            .collect();
        let config: AclConfig = toml::Value::Table(table).try_into()?;
        config.validated()
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// SQLite row source described by this config
    ///
    /// Fails if any table or column name is not a plain SQL identifier.
    pub fn source(&self) -> Result<SqliteSource> {
        let table = SqlIdentifier::new(self.db_table.as_str())?;
        let user_column = SqlIdentifier::new(self.db_user_column.as_str())?;
        let catalog_column = SqlIdentifier::new(self.db_catalog_column.as_str())?;

        Ok(SqliteSource::new(&self.db_path, table).with_columns(user_column, catalog_column))
    }
}
