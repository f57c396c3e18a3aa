// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Stockpile model SSOT.
//!
//! Every crate in the workspace speaks these types: validated column
//! names, the inventory record with its open-ended dynamic values, and
//! the outbound notification port.

mod column;
mod notify;
mod record;

pub use column::{ColumnName, ParseError, RequiredColumn, COLUMN_NAME_MAX_LEN};
pub use notify::{LowStockAlert, Notifier, NotifyError};
pub use record::{InventoryRecord, RecordDraft, RecordId};

pub const ENV_STOCKPILE_DB: &str = "STOCKPILE_DB";
pub const ENV_STOCKPILE_AUTH_DB: &str = "STOCKPILE_AUTH_DB";
pub const ENV_STOCKPILE_LOG: &str = "STOCKPILE_LOG";
