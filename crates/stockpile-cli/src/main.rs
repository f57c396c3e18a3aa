// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod helpers;

use clap::Parser;
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use commands::{ColumnCommand, Commands, ItemCommand, UserCommand};
use helpers::{init_tracing, resolve_auth_db_path, resolve_db_path, StdoutNotifier};
use stockpile_auth::CredentialStore;
use stockpile_ingest::{spawn_export, spawn_import};
use stockpile_model::{ColumnName, LowStockAlert, Notifier, RecordDraft};
use stockpile_query::{filter_records, FilterCriteria};
use stockpile_store::InventoryStore;

#[derive(Parser)]
#[command(name = "stockpile")]
#[command(about = "Stockpile inventory operations CLI")]
struct Cli {
    /// Inventory database path (falls back to STOCKPILE_DB, then ./stockpile.db).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Credential database path (falls back to STOCKPILE_AUTH_DB).
    #[arg(long, global = true)]
    auth_db: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    match run(cli) {
        Ok(()) => ProcessExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ProcessExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let db_path = resolve_db_path(cli.db);
    match cli.command {
        Commands::Column { command } => {
            let store = InventoryStore::open(db_path)?;
            run_column(&store, command, cli.json)
        }
        Commands::Item { command } => {
            let store = InventoryStore::open(db_path)?;
            run_item(&store, command, cli.json)
        }
        Commands::Import { path } => {
            let store = InventoryStore::open(db_path)?;
            let report = spawn_import(store, path)?.join()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "imported {} rows ({} skipped, {} columns added)",
                    report.rows_imported,
                    report.rows_skipped.len(),
                    report.columns_added.len()
                );
                for skipped in &report.rows_skipped {
                    println!("  line {}: {}", skipped.line, skipped.reason);
                }
            }
            Ok(())
        }
        Commands::Export { path } => {
            let store = InventoryStore::open(db_path)?;
            let report = spawn_export(store, path)?.join()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("exported {} rows", report.rows_exported);
            }
            Ok(())
        }
        Commands::Alert {
            part_number,
            recipient,
        } => {
            let store = InventoryStore::open(db_path)?;
            let records = store.scan_all()?;
            let record = records
                .iter()
                .find(|r| r.part_number == part_number)
                .ok_or_else(|| format!("no record with part number {part_number}"))?;
            let alert = LowStockAlert {
                name: record.name.clone(),
                part_number: record.part_number.clone(),
                quantity: record.quantity,
            };
            StdoutNotifier.notify(&alert.message(), &recipient)?;
            Ok(())
        }
        Commands::User { command } => {
            let store = CredentialStore::open(resolve_auth_db_path(cli.auth_db))?;
            run_user(&store, command, cli.json)
        }
    }
}

fn run_column(
    store: &InventoryStore,
    command: ColumnCommand,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    match command {
        ColumnCommand::Add { name } => {
            let added = store.add_column(&name)?;
            if json {
                println!("{}", json!({ "added": added.as_str() }));
            } else {
                println!("column {added} registered");
            }
        }
        ColumnCommand::List => {
            let columns = store.dynamic_columns()?;
            if json {
                let names: Vec<&str> = columns.iter().map(ColumnName::as_str).collect();
                println!("{}", json!({ "dynamic_columns": names }));
            } else {
                for column in columns {
                    println!("{column}");
                }
            }
        }
    }
    Ok(())
}

fn run_item(
    store: &InventoryStore,
    command: ItemCommand,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    match command {
        ItemCommand::Add {
            name,
            part_number,
            quantity,
            set,
        } => {
            let mut draft = RecordDraft::new(name, part_number, quantity);
            for (column, value) in set {
                let column = ColumnName::parse(&column)?;
                draft = draft.with_value(column, value);
            }
            let id = store.insert(&draft)?;
            if json {
                println!("{}", json!({ "id": id.as_i64() }));
            } else {
                println!("inserted record {}", id.as_i64());
            }
        }
        ItemCommand::List { filter } => {
            let mut criteria = FilterCriteria::new();
            for (column, value) in filter {
                criteria = criteria.with(column, value);
            }
            let records = filter_records(store.scan_all()?, &criteria);
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in records {
                    let dynamics: Vec<String> = record
                        .dynamic_values
                        .iter()
                        .map(|(column, value)| format!("{column}={value}"))
                        .collect();
                    println!(
                        "#{} {} [{}] qty {} {}",
                        record.id.as_i64(),
                        record.name,
                        record.part_number,
                        record.quantity,
                        dynamics.join(" ")
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_user(
    store: &CredentialStore,
    command: UserCommand,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    match command {
        UserCommand::Create { username, password } => {
            store.create(&username, &password)?;
            if json {
                println!("{}", json!({ "created": username }));
            } else {
                println!("user {username} created");
            }
            Ok(())
        }
        UserCommand::Verify { username, password } => {
            let ok = store.verify(&username, &password)?;
            if json {
                println!("{}", json!({ "verified": ok }));
            } else {
                println!("{}", if ok { "verified" } else { "rejected" });
            }
            if ok {
                Ok(())
            } else {
                Err("credentials rejected".into())
            }
        }
    }
}
