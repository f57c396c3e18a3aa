// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Credential store sibling to the inventory store. Lives in its own
//! SQLite database; passwords are stored as salted bcrypt hashes and
//! never round-trip out of this crate.

use rusqlite::{params, Connection, OptionalExtension};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Salted adaptive hash cost. 12 is the cost the original application
/// shipped with.
pub const BCRYPT_COST: u32 = 12;

#[derive(Debug)]
#[non_exhaustive]
pub enum AuthError {
    /// Username or password failed validation before any storage work.
    InvalidInput(String),
    /// Username already taken.
    DuplicateUser(String),
    /// Hashing backend failure.
    Hash(String),
    /// Open/read/write failure on the credential database.
    Io(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid credential input: {msg}"),
            Self::DuplicateUser(name) => write!(f, "username {name} already exists"),
            Self::Hash(msg) => write!(f, "password hashing failure: {msg}"),
            Self::Io(msg) => write!(f, "credential store i/o failure: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

const USERS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      username TEXT NOT NULL UNIQUE,
      password_hash TEXT NOT NULL
    );
";

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let store = Self { path: path.into() };
        let conn = store.session()?;
        conn.execute_batch(USERS_SCHEMA)
            .map_err(|e| AuthError::Io(e.to_string()))?;
        Ok(store)
    }

    fn session(&self) -> Result<Connection, AuthError> {
        Connection::open(&self.path).map_err(|e| AuthError::Io(e.to_string()))
    }

    /// Creates a user with a bcrypt-hashed password. The username is
    /// trimmed; both fields must be non-empty.
    pub fn create(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::InvalidInput("username must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password must not be empty".to_string()));
        }

        let hash =
            bcrypt::hash(password, BCRYPT_COST).map_err(|e| AuthError::Hash(e.to_string()))?;
        let conn = self.session()?;
        let inserted = conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
            params![username, hash],
        );
        match inserted {
            Ok(_) => {
                tracing::info!(username, "created user");
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => {
                Err(AuthError::DuplicateUser(username.to_string()))
            }
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }

    /// Verifies a password. An unknown username is reported the same
    /// way as a wrong password: `Ok(false)`.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let conn = self.session()?;
        let stored: Option<String> = conn
            .query_row(
                "SELECT password_hash FROM users WHERE username = ?1",
                params![username.trim()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AuthError::Io(e.to_string()))?;
        match stored {
            None => Ok(false),
            Some(hash) => {
                bcrypt::verify(password, &hash).map_err(|e| AuthError::Hash(e.to_string()))
            }
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::ConstraintViolation)
    )
}
