// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::io::{BufRead, BufReader, Read};

use serde::{Deserialize, Serialize};
use stockpile_model::{ColumnName, RecordDraft, RequiredColumn};
use stockpile_store::{InventoryStore, StoreError};

#[derive(Debug)]
#[non_exhaustive]
pub enum ImportError {
    /// The stream held no header line.
    EmptyInput,
    /// The stream itself became unreadable.
    Io(String),
    /// The persistence layer failed; aborts the whole import.
    Store(StoreError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("import input has no header line"),
            Self::Io(msg) => write!(f, "import i/o failure: {msg}"),
            Self::Store(err) => write!(f, "import store failure: {err}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<StoreError> for ImportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkippedRow {
    /// 1-based line number in the input stream.
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkippedColumn {
    pub name: String,
    pub reason: String,
}

/// Aggregate outcome of one import run. A run that skipped rows is
/// still an overall success; callers distinguish partial from total
/// success by inspecting `rows_skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportReport {
    pub rows_imported: u64,
    pub rows_skipped: Vec<SkippedRow>,
    pub columns_added: Vec<String>,
    pub columns_skipped: Vec<SkippedColumn>,
}

impl ImportReport {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.rows_skipped.is_empty() || !self.columns_skipped.is_empty()
    }
}

/// One position of the reconciled header.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HeaderField {
    Required(RequiredColumn),
    Dynamic(ColumnName),
    /// Header token was unusable; values at this position are ignored.
    Skipped,
}

/// Imports comma-separated text from `input` into `store`.
///
/// The first line names columns; required columns are recognized under
/// their display and storage spellings, every other token is registered
/// as a dynamic column before any row is inserted. Schema growth
/// persists even if the data load later fails partway. Per-row failures
/// are recorded and skipped; only stream or store I/O aborts the run.
pub fn import_csv<R: Read>(
    store: &InventoryStore,
    input: R,
) -> Result<ImportReport, ImportError> {
    let reader = BufReader::new(input);
    let mut lines = reader.lines();

    let header_line = match lines.next() {
        None => return Err(ImportError::EmptyInput),
        Some(Err(e)) => return Err(ImportError::Io(e.to_string())),
        Some(Ok(line)) => line,
    };
    if header_line.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let mut report = ImportReport::default();
    let header = reconcile_header(store, &header_line, &mut report)?;

    for (offset, line) in lines.enumerate() {
        let line_number = offset + 2;
        let line = line.map_err(|e| ImportError::Io(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        match build_draft(&header, &line) {
            Ok(draft) => match store.insert(&draft) {
                Ok(_) => report.rows_imported += 1,
                Err(err @ StoreError::Io(_)) => return Err(ImportError::Store(err)),
                Err(err) => skip_row(&mut report, line_number, err.to_string()),
            },
            Err(reason) => skip_row(&mut report, line_number, reason),
        }
    }

    tracing::info!(
        rows_imported = report.rows_imported,
        rows_skipped = report.rows_skipped.len(),
        columns_added = report.columns_added.len(),
        "import finished"
    );
    Ok(report)
}

fn skip_row(report: &mut ImportReport, line: usize, reason: String) {
    tracing::warn!(line, %reason, "skipping import row");
    report.rows_skipped.push(SkippedRow { line, reason });
}

/// Splits the header, routes each token to a required column or a
/// dynamic one, and registers missing dynamic columns. An unusable
/// token (invalid column name) skips that position, not the file.
fn reconcile_header(
    store: &InventoryStore,
    header_line: &str,
    report: &mut ImportReport,
) -> Result<Vec<HeaderField>, ImportError> {
    let mut fields = Vec::new();
    for token in header_line.split(',') {
        let token = token.trim();
        if let Some(required) = RequiredColumn::from_header_token(token) {
            fields.push(HeaderField::Required(required));
            continue;
        }
        let existed = store.column_exists(token)?;
        match store.add_column(token) {
            Ok(name) => {
                if !existed {
                    report.columns_added.push(name.as_str().to_string());
                }
                fields.push(HeaderField::Dynamic(name));
            }
            Err(err @ StoreError::Io(_)) => return Err(ImportError::Store(err)),
            Err(err) => {
                tracing::warn!(column = token, reason = %err, "skipping import column");
                report.columns_skipped.push(SkippedColumn {
                    name: token.to_string(),
                    reason: err.to_string(),
                });
                fields.push(HeaderField::Skipped);
            }
        }
    }
    Ok(fields)
}

/// Zips one data row positionally against the reconciled header.
fn build_draft(header: &[HeaderField], line: &str) -> Result<RecordDraft, String> {
    let values: Vec<&str> = line.split(',').map(str::trim).collect();
    if values.len() != header.len() {
        return Err(format!(
            "column count mismatch: header has {}, row has {}",
            header.len(),
            values.len()
        ));
    }

    let mut draft = RecordDraft::new("", "", 0);
    let mut quantity_seen = false;
    for (field, value) in header.iter().zip(values) {
        match field {
            HeaderField::Required(RequiredColumn::Name) => draft.name = value.to_string(),
            HeaderField::Required(RequiredColumn::PartNumber) => {
                draft.part_number = value.to_string();
            }
            HeaderField::Required(RequiredColumn::Quantity) => {
                draft.quantity = value
                    .parse::<i64>()
                    .map_err(|_| format!("malformed quantity {value:?}"))?;
                quantity_seen = true;
            }
            // Ids are store-assigned; an imported id is discarded.
            HeaderField::Required(_) | HeaderField::Skipped => {}
            HeaderField::Dynamic(column) => {
                draft
                    .dynamic_values
                    .insert(column.clone(), value.to_string());
            }
        }
    }
    if !quantity_seen {
        return Err("header has no quantity column".to_string());
    }
    Ok(draft)
}
