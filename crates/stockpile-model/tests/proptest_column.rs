// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use stockpile_model::{ColumnName, COLUMN_NAME_MAX_LEN};

proptest! {
    #[test]
    fn valid_identifiers_round_trip_through_parse(
        name in "[A-Za-z_][A-Za-z0-9_]{0,62}",
    ) {
        match ColumnName::parse(&name) {
            Ok(col) => prop_assert_eq!(col.as_str(), name.as_str()),
            // Only case variants of the reserved storage names may be
            // refused here.
            Err(_) => prop_assert!(
                ["id", "item_name", "part_number", "quantity"]
                    .iter()
                    .any(|reserved| reserved.eq_ignore_ascii_case(&name))
            ),
        }
    }

    #[test]
    fn parse_never_accepts_names_with_non_identifier_chars(
        prefix in "[A-Za-z_]{1,8}",
        bad in "[^A-Za-z0-9_]",
        suffix in "[A-Za-z0-9_]{0,8}",
    ) {
        let candidate = format!("{prefix}{bad}{suffix}");
        // Surrounding whitespace is trimmed, so only reject when the
        // offending character survives the trim.
        if candidate.trim() == candidate {
            prop_assert!(ColumnName::parse(&candidate).is_err());
        }
    }

    #[test]
    fn parse_enforces_the_length_cap(len in 65usize..128) {
        let name = "c".repeat(len);
        prop_assert!(name.len() > COLUMN_NAME_MAX_LEN);
        prop_assert!(ColumnName::parse(&name).is_err());
    }
}
