// SPDX-License-Identifier: Apache-2.0

use clap::Subcommand;
use std::path::PathBuf;

use crate::helpers::parse_key_value;

#[derive(Subcommand)]
pub(crate) enum ColumnCommand {
    /// Register a new dynamic column (no-op if it already exists).
    Add { name: String },
    /// List dynamic columns in addition order.
    List,
}

#[derive(Subcommand)]
pub(crate) enum ItemCommand {
    /// Insert one inventory record.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        part_number: String,
        #[arg(long)]
        quantity: i64,
        /// Dynamic value as `column=value`; repeatable. The column must
        /// already be registered.
        #[arg(long = "set", value_parser = parse_key_value)]
        set: Vec<(String, String)>,
    },
    /// List records, optionally filtered on dynamic values.
    List {
        /// Filter criterion as `column=value`; repeatable, conjunctive,
        /// value match is case-insensitive.
        #[arg(long = "filter", value_parser = parse_key_value)]
        filter: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
pub(crate) enum UserCommand {
    /// Create a user with a bcrypt-hashed password.
    Create { username: String, password: String },
    /// Check a username/password pair.
    Verify { username: String, password: String },
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    Column {
        #[command(subcommand)]
        command: ColumnCommand,
    },
    Item {
        #[command(subcommand)]
        command: ItemCommand,
    },
    /// Import a CSV file (runs in the background, waits for completion).
    Import { path: PathBuf },
    /// Export the required-column projection to a CSV file.
    Export { path: PathBuf },
    /// Send a low-stock alert for one part. Always operator-triggered;
    /// never derived from a quantity threshold.
    Alert {
        #[arg(long)]
        part_number: String,
        #[arg(long)]
        recipient: String,
    },
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
}
