// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct NotifyError(pub String);

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotifyError {}

/// Outbound notification port. Delivery (SMS or otherwise) lives with
/// the operating environment; the core only composes and hands off the
/// message. Triggering is always an explicit operator action, never
/// derived from quantity.
pub trait Notifier {
    fn notify(&self, message: &str, recipient: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub name: String,
    pub part_number: String,
    pub quantity: u32,
}

impl LowStockAlert {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Low stock: {} (part {}) is down to {}",
            self.name, self.part_number, self.quantity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::LowStockAlert;

    #[test]
    fn alert_message_names_item_part_and_quantity() {
        let alert = LowStockAlert {
            name: "Bolt".to_string(),
            part_number: "B-100".to_string(),
            quantity: 3,
        };
        assert_eq!(alert.message(), "Low stock: Bolt (part B-100) is down to 3");
    }
}
