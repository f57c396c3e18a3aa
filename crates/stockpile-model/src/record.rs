// SPDX-License-Identifier: Apache-2.0

use crate::column::ColumnName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store-assigned record identifier. Unique, monotonic, immutable once
/// assigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

/// One inventory entry as read back from the store.
///
/// `dynamic_values` holds one entry per registered dynamic column for
/// which this record has a stored value. A record that predates a
/// column carries no entry for it; absent is not the same thing as an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: RecordId,
    pub name: String,
    pub part_number: String,
    pub quantity: u32,
    pub dynamic_values: BTreeMap<ColumnName, String>,
}

impl InventoryRecord {
    #[must_use]
    pub fn dynamic_value(&self, column: &str) -> Option<&str> {
        self.dynamic_values.get(column).map(String::as_str)
    }
}

/// Caller-supplied fields for an insert. Quantity stays signed here so
/// the store can reject negatives explicitly instead of the type system
/// silently truncating them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub part_number: String,
    pub quantity: i64,
    pub dynamic_values: BTreeMap<ColumnName, String>,
}

impl RecordDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, part_number: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            part_number: part_number.into(),
            quantity,
            dynamic_values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, column: ColumnName, value: impl Into<String>) -> Self {
        self.dynamic_values.insert(column, value.into());
        self
    }
}
