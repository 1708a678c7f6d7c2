//! Row sources for the policy table
//!
//! A row source fetches the complete `(user, catalog)` row set in one go.
//! Timeouts and retries, if any, belong to the source, never to the store.

use crate::core::validation::SqlIdentifier;
use crate::error::PolicyLoadError;
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OpenFlags, Row, Statement};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single `(user, catalog)` row
pub type PolicyRow = (String, String);

/// Something that can produce the full policy row set
pub trait RowSource: Send + Sync {
    /// Fetch every row, or fail without returning any
    fn fetch(&self) -> Result<Vec<PolicyRow>, PolicyLoadError>;

    /// Human-readable description used in logs
    fn describe(&self) -> String;
}

/// Rows already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<PolicyRow>,
}

impl MemorySource {
    /// Create a source from `(user, catalog)` pairs
    pub fn new<I, U, C>(rows: I) -> Self
    where
        I: IntoIterator<Item = (U, C)>,
        U: Into<String>,
        C: Into<String>,
    {
        MemorySource {
            rows: rows
                .into_iter()
                .map(|(user, catalog)| (user.into(), catalog.into()))
                .collect(),
        }
    }
}

impl RowSource for MemorySource {
    fn fetch(&self) -> Result<Vec<PolicyRow>, PolicyLoadError> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }
}

/// Policy table stored in a SQLite database
///
/// Runs `SELECT "<user_column>", "<catalog_column>" FROM "<table>"` on a
/// read-only connection. Both columns must exist in the table; a missing
/// column fails the load instead of being read as a string literal.
///
/// Integer and real cells are read as their decimal text, so a catalog
/// stored as `2024` loads as `"2024"`. NULL, blob and non-UTF-8 cells fail
/// the whole load.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
    table: SqlIdentifier,
    user_column: SqlIdentifier,
    catalog_column: SqlIdentifier,
}

impl SqliteSource {
    /// Create a source reading `table` with the default `user`/`catalog` columns
    pub fn new(path: impl AsRef<Path>, table: SqlIdentifier) -> Self {
        SqliteSource {
            path: path.as_ref().to_path_buf(),
            table,
            user_column: SqlIdentifier::user_column(),
            catalog_column: SqlIdentifier::catalog_column(),
        }
    }

    /// Override the column names
    pub fn with_columns(mut self, user_column: SqlIdentifier, catalog_column: SqlIdentifier) -> Self {
        self.user_column = user_column;
        self.catalog_column = catalog_column;
        self
    }

    /// Query text executed by [`RowSource::fetch`]
    pub fn query(&self) -> String {
        format!(
            "SELECT {}, {} FROM {}",
            self.user_column.quoted(),
            self.catalog_column.quoted(),
            self.table.quoted()
        )
    }

    fn open(&self) -> rusqlite::Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    /// Fail unless both configured columns are real columns of the table
    fn check_columns(&self, conn: &Connection) -> Result<(), PolicyLoadError> {
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
        let columns = stmt
            .query_map([self.table.as_str()], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for column in [&self.user_column, &self.catalog_column] {
            // SQLite resolves identifiers case-insensitively
            if !columns.iter().any(|c| c.eq_ignore_ascii_case(column.as_str())) {
                return Err(PolicyLoadError::MissingColumn {
                    table: self.table.to_string(),
                    column: column.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Text of a policy cell, converting numeric storage classes
fn cell_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    match row.get_ref(idx)? {
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        ValueRef::Integer(i) => Ok(i.to_string()),
        ValueRef::Real(f) => Ok(f.to_string()),
        ValueRef::Null => Err(rusqlite::Error::InvalidColumnType(
            idx,
            column_name(row, idx),
            Type::Null,
        )),
        ValueRef::Blob(_) => Err(rusqlite::Error::InvalidColumnType(
            idx,
            column_name(row, idx),
            Type::Blob,
        )),
    }
}

fn column_name(row: &Row<'_>, idx: usize) -> String {
    let stmt: &Statement<'_> = row.as_ref();
    stmt.column_name(idx)
        .map(str::to_string)
        .unwrap_or_default()
}

impl RowSource for SqliteSource {
    fn fetch(&self) -> Result<Vec<PolicyRow>, PolicyLoadError> {
        let conn = self.open()?;
        let sql = self.query();
        debug!("Fetching policy rows: {}", sql);

        // prepare first so a missing table reports SQLite's own error
        let mut stmt = conn.prepare(&sql)?;
        self.check_columns(&conn)?;

        let rows = stmt
            .query_map([], |row| Ok((cell_text(row, 0)?, cell_text(row, 1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("sqlite {:?} table {}", self.path, self.table.as_str())
    }
}
