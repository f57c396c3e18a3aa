// SPDX-License-Identifier: Apache-2.0

use std::io::Cursor;

use crate::{export_csv, import_csv, ImportError, EXPORT_HEADER};
use stockpile_model::RecordDraft;
use stockpile_store::InventoryStore;
use tempfile::tempdir;

fn fresh_store(dir: &tempfile::TempDir) -> InventoryStore {
    InventoryStore::open(dir.path().join("inventory.db")).expect("open store")
}

#[test]
fn import_tolerates_malformed_rows_and_reports_them() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let input = "Name,Part Number,Quantity\nWidget,W-1,10\nBad,Row\nGear,G-2,5\n";
    let report = import_csv(&store, Cursor::new(input)).expect("import");

    assert_eq!(report.rows_imported, 2);
    assert_eq!(report.rows_skipped.len(), 1);
    assert_eq!(report.rows_skipped[0].line, 3);
    assert!(report.is_partial());

    let records = store.scan_all().expect("scan");
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Widget", "Gear"]);
}

#[test]
fn import_registers_unknown_header_columns_before_inserting() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let input = "Name,Part Number,Quantity,Bin\nWidget,W-1,10,A1\n";
    let report = import_csv(&store, Cursor::new(input)).expect("import");

    assert_eq!(report.columns_added, vec!["Bin".to_string()]);
    let records = store.scan_all().expect("scan");
    assert_eq!(records[0].dynamic_value("Bin"), Some("A1"));
}

#[test]
fn import_does_not_re_add_required_or_known_columns() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);
    store.add_column("Bin").expect("pre-register Bin");

    let input = "name,part_number,quantity,Bin\nWidget,W-1,10,A1\n";
    let report = import_csv(&store, Cursor::new(input)).expect("import");

    assert!(report.columns_added.is_empty());
    assert_eq!(store.dynamic_columns().expect("columns").len(), 1);
    assert_eq!(report.rows_imported, 1);
}

#[test]
fn import_accepts_case_variant_headers_of_known_columns() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);
    store.add_column("Bin").expect("pre-register Bin");

    // "BIN" names the same physical column as "Bin"; the import must
    // write through it rather than abort on a duplicate-column error.
    let input = "Name,Part Number,Quantity,BIN\nWidget,W-1,10,A1\n";
    let report = import_csv(&store, Cursor::new(input)).expect("import");

    assert_eq!(report.rows_imported, 1);
    assert!(report.columns_added.is_empty());
    assert!(report.columns_skipped.is_empty());
    assert_eq!(store.dynamic_columns().expect("columns").len(), 1);
    let records = store.scan_all().expect("scan");
    assert_eq!(records[0].dynamic_value("Bin"), Some("A1"));
}

#[test]
fn import_skips_unusable_header_columns_but_keeps_importing() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let input = "Name,Part Number,Quantity,bad;col\nWidget,W-1,10,ignored\n";
    let report = import_csv(&store, Cursor::new(input)).expect("import");

    assert_eq!(report.columns_skipped.len(), 1);
    assert_eq!(report.columns_skipped[0].name, "bad;col");
    assert_eq!(report.rows_imported, 1);
    assert!(store.dynamic_columns().expect("columns").is_empty());
}

#[test]
fn import_of_empty_stream_fails_with_empty_input() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let err = import_csv(&store, Cursor::new("")).expect_err("empty stream");
    assert!(matches!(err, ImportError::EmptyInput));
    let err = import_csv(&store, Cursor::new("   \nWidget,W-1,10\n")).expect_err("blank header");
    assert!(matches!(err, ImportError::EmptyInput));
}

#[test]
fn import_schema_growth_survives_failed_rows() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    // Every data row is malformed, but the header still evolved the schema.
    let input = "Name,Part Number,Quantity,Bin\nonly,three,columns?\n";
    let report = import_csv(&store, Cursor::new(input)).expect("import");

    assert_eq!(report.rows_imported, 0);
    assert_eq!(report.rows_skipped.len(), 1);
    assert_eq!(store.dynamic_columns().expect("columns").len(), 1);
}

#[test]
fn import_without_quantity_column_skips_every_row() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let input = "Name,Part Number\nWidget,W-1\n";
    let report = import_csv(&store, Cursor::new(input)).expect("import");

    assert_eq!(report.rows_imported, 0);
    assert_eq!(report.rows_skipped.len(), 1);
    assert!(report.rows_skipped[0].reason.contains("quantity"));
}

#[test]
fn export_writes_only_the_required_projection() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let bin = store.add_column("Bin").expect("add Bin");
    store
        .insert(&RecordDraft::new("Bolt", "B-100", 50).with_value(bin, "A1"))
        .expect("insert");

    let mut out = Vec::new();
    let report = export_csv(&store, &mut out).expect("export");
    assert_eq!(report.rows_exported, 1);

    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(text, format!("{EXPORT_HEADER}\nBolt,B-100,50\n"));
    assert!(!text.contains("A1"), "dynamic values must not be exported");
}

#[test]
fn export_of_empty_store_writes_just_the_header() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let mut out = Vec::new();
    let report = export_csv(&store, &mut out).expect("export");
    assert_eq!(report.rows_exported, 0);
    assert_eq!(String::from_utf8(out).expect("utf8"), format!("{EXPORT_HEADER}\n"));
}

#[test]
fn import_report_serializes_for_structured_consumers() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let input = "Name,Part Number,Quantity\nWidget,W-1,10\nBad,Row\n";
    let report = import_csv(&store, Cursor::new(input)).expect("import");

    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["rows_imported"], 1);
    assert_eq!(json["rows_skipped"][0]["line"], 3);
    let back: crate::ImportReport = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, report);
}

#[test]
fn imported_then_exported_data_round_trips_required_fields() {
    let dir = tempdir().expect("tmp");
    let store = fresh_store(&dir);

    let input = "Name,Part Number,Quantity\nWidget,W-1,10\n";
    import_csv(&store, Cursor::new(input)).expect("import");

    let mut out = Vec::new();
    export_csv(&store, &mut out).expect("export");
    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        format!("{EXPORT_HEADER}\nWidget,W-1,10\n")
    );
}
