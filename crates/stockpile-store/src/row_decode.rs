// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use stockpile_model::{ColumnName, InventoryRecord, RecordId};

/// Decodes one `items` row projected as
/// `id, item_name, part_number, quantity, <dynamic columns...>`.
///
/// Required columns are nullable at the storage layer (the original
/// schema never declared NOT NULL), so a NULL there marks the row as
/// incomplete and the scan skips it. NULL dynamic cells simply mean the
/// row predates that column.
pub(crate) fn decode_record(
    row: &rusqlite::Row<'_>,
    dynamic: &[ColumnName],
) -> Result<InventoryRecord, String> {
    let id: i64 = row.get(0).map_err(|e| e.to_string())?;

    let name: Option<String> = row.get(1).map_err(|e| e.to_string())?;
    let Some(name) = name else {
        return Err(format!("row {id}: item_name is missing"));
    };
    let part_number: Option<String> = row.get(2).map_err(|e| e.to_string())?;
    let Some(part_number) = part_number else {
        return Err(format!("row {id}: part_number is missing"));
    };
    let quantity: Option<i64> = row.get(3).map_err(|e| e.to_string())?;
    let Some(quantity) = quantity else {
        return Err(format!("row {id}: quantity is missing"));
    };
    let quantity =
        u32::try_from(quantity).map_err(|_| format!("row {id}: quantity {quantity} is invalid"))?;

    let mut dynamic_values = BTreeMap::new();
    for (offset, column) in dynamic.iter().enumerate() {
        let value: Option<String> = row.get(4 + offset).map_err(|e| e.to_string())?;
        if let Some(value) = value {
            dynamic_values.insert(column.clone(), value);
        }
    }

    Ok(InventoryRecord {
        id: RecordId::new(id),
        name,
        part_number,
        quantity,
        dynamic_values,
    })
}
