//! Qualified object names passed to access-control hooks

use serde::{Deserialize, Serialize};
use std::fmt;

/// `catalog.schema`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogSchemaName {
    pub catalog: String,
    pub schema: String,
}

impl CatalogSchemaName {
    pub fn new(catalog: impl Into<String>, schema: impl Into<String>) -> Self {
        CatalogSchemaName {
            catalog: catalog.into(),
            schema: schema.into(),
        }
    }
}

impl fmt::Display for CatalogSchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.catalog, self.schema)
    }
}

/// `schema.table`, unqualified by catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaTableName {
    pub schema: String,
    pub table: String,
}

impl SchemaTableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        SchemaTableName {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for SchemaTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// `catalog.schema.table`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogSchemaTableName {
    pub catalog: String,
    pub schema_table: SchemaTableName,
}

impl CatalogSchemaTableName {
    pub fn new(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        CatalogSchemaTableName {
            catalog: catalog.into(),
            schema_table: SchemaTableName::new(schema, table),
        }
    }
}

impl fmt::Display for CatalogSchemaTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.catalog, self.schema_table)
    }
}

/// Table privileges that can be granted or revoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Privilege {
    Select,
    Insert,
    Delete,
}
