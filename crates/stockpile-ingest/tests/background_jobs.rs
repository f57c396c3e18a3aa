// SPDX-License-Identifier: Apache-2.0

use std::fs;

use stockpile_ingest::{spawn_export, spawn_import, ImportError, EXPORT_HEADER};
use stockpile_store::InventoryStore;
use tempfile::tempdir;

#[test]
fn background_import_then_export_round_trips_a_file() {
    let dir = tempdir().expect("tmp");
    let store = InventoryStore::open(dir.path().join("inventory.db")).expect("open store");

    let csv_in = dir.path().join("incoming.csv");
    fs::write(
        &csv_in,
        "Name,Part Number,Quantity,Bin\nWidget,W-1,10,A1\nGear,G-2,5,B3\n",
    )
    .expect("write input");

    let report = spawn_import(store.clone(), csv_in)
        .expect("spawn import")
        .join()
        .expect("import completes");
    assert_eq!(report.rows_imported, 2);
    assert!(!report.is_partial());

    let csv_out = dir.path().join("outgoing.csv");
    let report = spawn_export(store, csv_out.clone())
        .expect("spawn export")
        .join()
        .expect("export completes");
    assert_eq!(report.rows_exported, 2);

    let text = fs::read_to_string(csv_out).expect("read output");
    assert_eq!(text, format!("{EXPORT_HEADER}\nWidget,W-1,10\nGear,G-2,5\n"));
}

#[test]
fn background_import_of_missing_file_reports_io_failure() {
    let dir = tempdir().expect("tmp");
    let store = InventoryStore::open(dir.path().join("inventory.db")).expect("open store");

    let err = spawn_import(store, dir.path().join("no-such.csv"))
        .expect("spawn import")
        .join()
        .expect_err("missing file must fail");
    assert!(matches!(err, ImportError::Io(_)));
}
