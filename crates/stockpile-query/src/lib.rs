// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Filter engine: conjunctive exact-match criteria over dynamic column
//! values, compared case-insensitively. Holds no store state; callers
//! hand in a scanned record set per call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stockpile_model::InventoryRecord;

/// Caller-supplied criteria: dynamic column name to expected value.
/// Column lookup is exact; value comparison folds case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCriteria {
    pub entries: BTreeMap<String, String>,
}

impl FilterCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, expected: impl Into<String>) -> Self {
        self.entries.insert(column.into(), expected.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keeps the records matching every criterion, order preserved. Empty
/// criteria pass everything through unchanged. A record missing a
/// criterion's column entirely is excluded; absent never matches,
/// not even against an empty expected value.
#[must_use]
pub fn filter_records(
    records: Vec<InventoryRecord>,
    criteria: &FilterCriteria,
) -> Vec<InventoryRecord> {
    if criteria.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| matches_all(record, criteria))
        .collect()
}

fn matches_all(record: &InventoryRecord, criteria: &FilterCriteria) -> bool {
    criteria.entries.iter().all(|(column, expected)| {
        record
            .dynamic_value(column)
            .is_some_and(|value| value.to_lowercase() == expected.to_lowercase())
    })
}
