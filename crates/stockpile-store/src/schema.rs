// SPDX-License-Identifier: Apache-2.0

//! Schema registry over the append-only `schema_columns` log.
//!
//! The log records each accepted dynamic column in addition order;
//! `items` gains a matching TEXT column in the same transaction, so a
//! failure never leaves a partially-added column visible.

use crate::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use stockpile_model::{ColumnName, RequiredColumn};

pub(crate) fn dynamic_columns(conn: &Connection) -> Result<Vec<ColumnName>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT column_name FROM schema_columns ORDER BY position ASC")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    names
        .into_iter()
        .map(|raw| {
            ColumnName::parse(&raw).map_err(|e| {
                StoreError::Io(format!("column log entry {raw:?} is invalid: {e}"))
            })
        })
        .collect()
}

/// Column lookups are ASCII-case-insensitive throughout this module
/// because that is how SQLite resolves column names; "BIN" and "Bin"
/// name the same physical column.
pub(crate) fn column_exists(conn: &Connection, name: &str) -> Result<bool, StoreError> {
    if RequiredColumn::from_storage_name(name).is_some() {
        return Ok(true);
    }
    Ok(registered_spelling(conn, name)?.is_some())
}

/// The spelling under which `name` was registered, if any case variant
/// of it is in the column log.
fn registered_spelling(
    conn: &Connection,
    name: &str,
) -> Result<Option<ColumnName>, StoreError> {
    let found: Option<String> = conn
        .query_row(
            "SELECT column_name FROM schema_columns WHERE column_name = ?1 COLLATE NOCASE",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    found
        .map(|raw| {
            ColumnName::parse(&raw).map_err(|e| {
                StoreError::Io(format!("column log entry {raw:?} is invalid: {e}"))
            })
        })
        .transpose()
}

pub(crate) fn add_column(conn: &mut Connection, raw: &str) -> Result<ColumnName, StoreError> {
    let name =
        ColumnName::parse(raw).map_err(|e| StoreError::InvalidColumnName(e.to_string()))?;
    if let Some(existing) = registered_spelling(conn, name.as_str())? {
        // Idempotent: re-adding a column, under any casing, is a no-op
        // that resolves to the registered spelling.
        return Ok(existing);
    }

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO schema_columns (column_name) VALUES (?1)",
        params![name.as_str()],
    )?;
    tx.execute_batch(&format!(
        "ALTER TABLE items ADD COLUMN {} TEXT;",
        quote_identifier(name.as_str())
    ))?;
    tx.commit()?;
    tracing::debug!(column = name.as_str(), "registered dynamic column");
    Ok(name)
}

/// Double-quote an identifier for SQL. Validated names contain no
/// quotes, but the storage layer should never trust that here.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::{add_column, column_exists, dynamic_columns, quote_identifier};
    use crate::StoreError;
    use rusqlite::Connection;

    fn setup_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("open memory db");
        conn.execute_batch(crate::ITEMS_SCHEMA).expect("schema");
        conn
    }

    #[test]
    fn add_column_is_visible_and_ordered() {
        let mut conn = setup_conn();
        add_column(&mut conn, "Bin").expect("add Bin");
        add_column(&mut conn, "Color").expect("add Color");
        let names: Vec<String> = dynamic_columns(&conn)
            .expect("list")
            .into_iter()
            .map(|c| c.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["Bin", "Color"]);
        assert!(column_exists(&conn, "Bin").expect("exists"));
        assert!(column_exists(&conn, "quantity").expect("required exists"));
        assert!(!column_exists(&conn, "Shelf").expect("missing"));
    }

    #[test]
    fn add_column_twice_is_a_no_op() {
        let mut conn = setup_conn();
        add_column(&mut conn, "Bin").expect("first add");
        add_column(&mut conn, "Bin").expect("second add must not error");
        assert_eq!(dynamic_columns(&conn).expect("list").len(), 1);
    }

    #[test]
    fn add_column_resolves_case_variants_to_the_registered_spelling() {
        let mut conn = setup_conn();
        add_column(&mut conn, "Bin").expect("first add");
        let resolved = add_column(&mut conn, "BIN").expect("case variant must not error");
        assert_eq!(resolved.as_str(), "Bin");
        assert_eq!(dynamic_columns(&conn).expect("list").len(), 1);
        assert!(column_exists(&conn, "bIn").expect("exists"));
    }

    #[test]
    fn add_column_rejects_required_names_without_registry_change() {
        let mut conn = setup_conn();
        for reserved in ["quantity", "Quantity", "ITEM_NAME"] {
            let err = add_column(&mut conn, reserved).expect_err("must reject");
            assert!(matches!(err, StoreError::InvalidColumnName(_)));
        }
        assert!(dynamic_columns(&conn).expect("list").is_empty());
    }

    #[test]
    fn quote_identifier_escapes_embedded_quotes() {
        assert_eq!(quote_identifier("Bin"), "\"Bin\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
