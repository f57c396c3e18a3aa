// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use stockpile_model::{
    Notifier, NotifyError, ENV_STOCKPILE_AUTH_DB, ENV_STOCKPILE_DB, ENV_STOCKPILE_LOG,
};
use tracing_subscriber::EnvFilter;

pub(crate) fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let Some((column, value)) = raw.split_once('=') else {
        return Err(format!("expected column=value, got {raw:?}"));
    };
    let column = column.trim();
    if column.is_empty() {
        return Err("column name must not be empty".to_string());
    }
    Ok((column.to_string(), value.trim().to_string()))
}

pub(crate) fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    resolve_path(flag, ENV_STOCKPILE_DB, "stockpile.db")
}

pub(crate) fn resolve_auth_db_path(flag: Option<PathBuf>) -> PathBuf {
    resolve_path(flag, ENV_STOCKPILE_AUTH_DB, "stockpile-users.db")
}

fn resolve_path(flag: Option<PathBuf>, env_var: &str, default: &str) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(explicit) = std::env::var(env_var) {
        let trimmed = explicit.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(default)
}

pub(crate) fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_env(ENV_STOCKPILE_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Stand-in delivery channel: writes the message to stdout. A real
/// deployment plugs an SMS gateway in behind the same port.
pub(crate) struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str, recipient: &str) -> Result<(), NotifyError> {
        println!("notify {recipient}: {message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::parse_key_value;

    #[test]
    fn parse_key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("Bin=A=1").expect("parse"),
            ("Bin".to_string(), "A=1".to_string())
        );
    }

    #[test]
    fn parse_key_value_trims_and_rejects_empty_column() {
        assert_eq!(
            parse_key_value(" Color = Red ").expect("parse"),
            ("Color".to_string(), "Red".to_string())
        );
        assert!(parse_key_value("=Red").is_err());
        assert!(parse_key_value("no-equals").is_err());
    }
}
