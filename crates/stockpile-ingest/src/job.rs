// SPDX-License-Identifier: Apache-2.0

//! Background execution for the long-running pipelines.
//!
//! Import and export run to completion on a named worker thread; the
//! caller learns the outcome only by joining the handle (completion
//! notification, never row-by-row progress). Cancellation is not
//! supported.

use std::fs;
use std::path::PathBuf;
use std::thread::JoinHandle;

use crate::export::{export_csv, ExportError, ExportReport};
use crate::import::{import_csv, ImportError, ImportReport};
use stockpile_store::InventoryStore;

pub struct ImportTask {
    handle: JoinHandle<Result<ImportReport, ImportError>>,
}

impl ImportTask {
    /// Blocks until the import completes and yields its report.
    pub fn join(self) -> Result<ImportReport, ImportError> {
        self.handle
            .join()
            .unwrap_or_else(|_| Err(ImportError::Io("import worker panicked".to_string())))
    }
}

pub struct ExportTask {
    handle: JoinHandle<Result<ExportReport, ExportError>>,
}

impl ExportTask {
    /// Blocks until the export completes and yields its report.
    pub fn join(self) -> Result<ExportReport, ExportError> {
        self.handle
            .join()
            .unwrap_or_else(|_| Err(ExportError::Io("export worker panicked".to_string())))
    }
}

/// Opens `path` and runs the import off the caller's thread.
pub fn spawn_import(store: InventoryStore, path: PathBuf) -> Result<ImportTask, ImportError> {
    let handle = std::thread::Builder::new()
        .name("stockpile-import".to_string())
        .spawn(move || {
            let file = fs::File::open(&path).map_err(|e| ImportError::Io(e.to_string()))?;
            import_csv(&store, file)
        })
        .map_err(|e| ImportError::Io(e.to_string()))?;
    Ok(ImportTask { handle })
}

/// Creates `path` and runs the export off the caller's thread.
pub fn spawn_export(store: InventoryStore, path: PathBuf) -> Result<ExportTask, ExportError> {
    let handle = std::thread::Builder::new()
        .name("stockpile-export".to_string())
        .spawn(move || {
            let file = fs::File::create(&path).map_err(|e| ExportError::Io(e.to_string()))?;
            export_csv(&store, file)
        })
        .map_err(|e| ExportError::Io(e.to_string()))?;
    Ok(ExportTask { handle })
}
