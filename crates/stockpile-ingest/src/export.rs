// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::io::{BufWriter, Write};

use serde::{Deserialize, Serialize};
use stockpile_store::{InventoryStore, StoreError};

/// Fixed export header. Export is deliberately the required-column
/// projection only; dynamic columns never appear in the output.
pub const EXPORT_HEADER: &str = "Name,Part Number,Quantity";

#[derive(Debug)]
#[non_exhaustive]
pub enum ExportError {
    /// The destination could not be written.
    Io(String),
    /// The store could not be read.
    Store(StoreError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "export i/o failure: {msg}"),
            Self::Store(err) => write!(f, "export store failure: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<StoreError> for ExportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportReport {
    pub rows_exported: u64,
}

/// Writes every record's required-column projection to `out` as
/// comma-separated UTF-8 text, one `\n`-terminated line per record
/// after the fixed header. The writer is flushed before success is
/// reported; on any failure the destination is released as-is.
pub fn export_csv<W: Write>(store: &InventoryStore, out: W) -> Result<ExportReport, ExportError> {
    let records = store.scan_all()?;

    let mut writer = BufWriter::new(out);
    writeln!(writer, "{EXPORT_HEADER}").map_err(|e| ExportError::Io(e.to_string()))?;
    for record in &records {
        writeln!(
            writer,
            "{},{},{}",
            record.name, record.part_number, record.quantity
        )
        .map_err(|e| ExportError::Io(e.to_string()))?;
    }
    writer.flush().map_err(|e| ExportError::Io(e.to_string()))?;

    let report = ExportReport {
        rows_exported: records.len() as u64,
    };
    tracing::info!(rows_exported = report.rows_exported, "export finished");
    Ok(report)
}
