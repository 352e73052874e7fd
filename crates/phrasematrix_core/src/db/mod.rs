//! SQLite backing for the durable key-value store.
//!
//! # Responsibility
//! - Open connections and stamp them with the `kv_entries` schema.
//! - Define the error shared by connection bootstrap and key-value access.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A database stamped with a newer version is never written to.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{require_current_schema, schema_version, SCHEMA_VERSION};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Stored schema stamp differs from [`SCHEMA_VERSION`].
    SchemaMismatch { found: u32, expected: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaMismatch { found, expected } if found > expected => write!(
                f,
                "phrase database uses schema {found}, this build only understands {expected}"
            ),
            Self::SchemaMismatch { found, expected } => write!(
                f,
                "phrase database is at schema {found}, expected {expected}; open it with open_db first"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
