// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! SQLite-backed inventory store with a runtime-extensible schema.
//!
//! The `items` table carries the four required columns plus one real
//! column per registered dynamic column; the `schema_columns` table is
//! an append-only log of dynamic-column additions and the single source
//! of truth for registry order. Every operation opens its own
//! connection and releases it before returning; no handle is ever held
//! across operations.

mod row_decode;
mod schema;

use rusqlite::{params_from_iter, types::Value, Connection};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use stockpile_model::{ColumnName, InventoryRecord, RecordDraft, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// Candidate dynamic column name is empty, unsafe for the storage
    /// layer, or shadows a required column.
    InvalidColumnName(String),
    /// A write referenced a dynamic column that is not registered.
    SchemaMismatch(String),
    /// Quantity outside the accepted range, rejected before any
    /// storage work happens.
    InvalidQuantity(i64),
    /// Open/read/write failure on the persistence layer.
    Io(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColumnName(msg) => write!(f, "invalid column name: {msg}"),
            Self::SchemaMismatch(msg) => write!(f, "schema mismatch: {msg}"),
            Self::InvalidQuantity(q) => {
                write!(f, "quantity must be a non-negative 32-bit integer, got {q}")
            }
            Self::Io(msg) => write!(f, "store i/o failure: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Io(value.to_string())
    }
}

const ITEMS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS items (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      item_name TEXT,
      part_number TEXT,
      quantity INTEGER
    );
    CREATE TABLE IF NOT EXISTS schema_columns (
      position INTEGER PRIMARY KEY AUTOINCREMENT,
      column_name TEXT NOT NULL UNIQUE
    );
";

/// Handle on one inventory database file. Cheap to clone; each
/// operation acquires and releases its own connection.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    path: PathBuf,
}

impl InventoryStore {
    /// Opens (creating if needed) the inventory database at `path` and
    /// ensures the base tables exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        let conn = store.session()?;
        conn.execute_batch(ITEMS_SCHEMA)?;
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn session(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path).map_err(StoreError::from)
    }

    /// Registers a dynamic column. Trims the candidate, validates it,
    /// and extends both the column log and the `items` table in one
    /// transaction. Re-adding an existing column, under any casing, is
    /// a successful no-op that returns the registered spelling.
    pub fn add_column(&self, name: &str) -> Result<ColumnName, StoreError> {
        let mut conn = self.session()?;
        schema::add_column(&mut conn, name)
    }

    /// True iff `name` is a case variant of a required column's storage
    /// name or of a registered dynamic column.
    pub fn column_exists(&self, name: &str) -> Result<bool, StoreError> {
        let conn = self.session()?;
        schema::column_exists(&conn, name)
    }

    /// Registered dynamic columns, in addition order. This order is
    /// canonical for projections.
    pub fn dynamic_columns(&self) -> Result<Vec<ColumnName>, StoreError> {
        let conn = self.session()?;
        schema::dynamic_columns(&conn)
    }

    /// Persists a new record and returns its fresh id. Every key in the
    /// draft's `dynamic_values` must already be registered; schema
    /// evolution and data insertion are deliberately separate
    /// operations with independent failure modes.
    pub fn insert(&self, draft: &RecordDraft) -> Result<RecordId, StoreError> {
        let quantity = u32::try_from(draft.quantity)
            .map_err(|_| StoreError::InvalidQuantity(draft.quantity))?;
        let conn = self.session()?;
        let registered = schema::dynamic_columns(&conn)?;
        for key in draft.dynamic_values.keys() {
            if !registered.contains(key) {
                return Err(StoreError::SchemaMismatch(format!(
                    "dynamic column {} is not registered",
                    key.as_str()
                )));
            }
        }

        let mut columns: Vec<String> = vec![
            "item_name".to_string(),
            "part_number".to_string(),
            "quantity".to_string(),
        ];
        let mut values: Vec<Value> = vec![
            Value::Text(draft.name.clone()),
            Value::Text(draft.part_number.clone()),
            Value::Integer(i64::from(quantity)),
        ];
        for (column, value) in &draft.dynamic_values {
            columns.push(schema::quote_identifier(column.as_str()));
            values.push(Value::Text(value.clone()));
        }
        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO items ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );
        conn.execute(&sql, params_from_iter(values))?;
        Ok(RecordId::new(conn.last_insert_rowid()))
    }

    /// Reads every record under the current schema. Each call re-reads
    /// persisted state. Rows missing a required field are skipped with
    /// a warning rather than aborting the scan; dynamic cells that are
    /// NULL (the row predates the column) are omitted from the record's
    /// `dynamic_values`.
    pub fn scan_all(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        let conn = self.session()?;
        let dynamic = schema::dynamic_columns(&conn)?;

        let mut select: Vec<String> = vec![
            "id".to_string(),
            "item_name".to_string(),
            "part_number".to_string(),
            "quantity".to_string(),
        ];
        select.extend(dynamic.iter().map(|c| schema::quote_identifier(c.as_str())));
        let sql = format!("SELECT {} FROM items ORDER BY id ASC", select.join(", "));

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            match row_decode::decode_record(row, &dynamic) {
                Ok(record) => out.push(record),
                Err(reason) => {
                    tracing::warn!(%reason, "skipping unreadable inventory row");
                }
            }
        }
        Ok(out)
    }
}
