// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! CSV import/export for the inventory store.
//!
//! The dialect is deliberately naive: values are split on `,` with no
//! quoting or escaping, matching the format this store has always
//! exchanged. The import pipeline reconciles the header against the
//! schema registry (registering unknown columns), then inserts one
//! record per data row, skipping and reporting bad rows instead of
//! rolling back the whole file.

mod export;
mod import;
#[cfg(test)]
mod import_export_tests;
mod job;

pub use export::{export_csv, ExportError, ExportReport, EXPORT_HEADER};
pub use import::{import_csv, ImportError, ImportReport, SkippedColumn, SkippedRow};
pub use job::{spawn_export, spawn_import, ExportTask, ImportTask};
