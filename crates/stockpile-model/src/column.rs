// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const COLUMN_NAME_MAX_LEN: usize = 64;

/// The four columns every inventory record carries. Their storage names
/// are fixed; dynamic columns may never shadow them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RequiredColumn {
    Id,
    Name,
    PartNumber,
    Quantity,
}

impl RequiredColumn {
    pub const ALL: [Self; 4] = [Self::Id, Self::Name, Self::PartNumber, Self::Quantity];

    #[must_use]
    pub const fn storage_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "item_name",
            Self::PartNumber => "part_number",
            Self::Quantity => "quantity",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Name => "Name",
            Self::PartNumber => "Part Number",
            Self::Quantity => "Quantity",
        }
    }

    /// ASCII-case-insensitive match against a storage name, mirroring
    /// how SQLite resolves column names.
    #[must_use]
    pub fn from_storage_name(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|col| col.storage_name().eq_ignore_ascii_case(input))
    }

    /// Case-insensitive match for CSV header tokens, accepting both the
    /// display spelling (`Part Number`) and the storage spelling
    /// (`part_number`), plus the legacy `_id` alias.
    #[must_use]
    pub fn from_header_token(token: &str) -> Option<Self> {
        let folded = token.trim().to_ascii_lowercase();
        match folded.as_str() {
            "id" | "_id" => Some(Self::Id),
            "name" | "item_name" => Some(Self::Name),
            "part number" | "part_number" | "partnumber" => Some(Self::PartNumber),
            "quantity" => Some(Self::Quantity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty,
    TooLong(usize),
    InvalidChar(char),
    ReservedName(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("column name must not be empty"),
            Self::TooLong(max) => write!(f, "column name exceeds max length {max}"),
            Self::InvalidChar(c) => write!(f, "column name contains invalid character {c:?}"),
            Self::ReservedName(name) => {
                write!(f, "column name collides with required column {name}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A user-defined column name, validated to be safe for the storage
/// layer: leading whitespace trimmed, ASCII identifier charset only,
/// never a case variant of a required column's storage name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnName(String);

impl ColumnName {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        if trimmed.len() > COLUMN_NAME_MAX_LEN {
            return Err(ParseError::TooLong(COLUMN_NAME_MAX_LEN));
        }
        let mut chars = trimmed.chars();
        if let Some(first) = chars.next() {
            if !(first.is_ascii_alphabetic() || first == '_') {
                return Err(ParseError::InvalidChar(first));
            }
        }
        for c in chars {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                return Err(ParseError::InvalidChar(c));
            }
        }
        // Any case variant of a required storage name shadows that
        // column at the storage layer.
        if let Some(required) = RequiredColumn::from_storage_name(trimmed) {
            return Err(ParseError::ReservedName(required.storage_name()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ColumnName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lets maps keyed by `ColumnName` be probed with a plain `&str`.
impl std::borrow::Borrow<str> for ColumnName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
