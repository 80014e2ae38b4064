//! SQLite file backing the program storage slots.
//!
//! # Responsibility
//! - Hand out connections whose `storage_slots` table (one text value per
//!   key, plus an `updated_at` epoch-ms stamp) is ready for `SqliteSlot`.
//! - Keep the on-disk schema version in step with this binary.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`; `SqliteSlot::try_new`
//!   refuses connections whose version differs from `latest_version()`.
//! - A file written by a newer build is reported, never opened or rewritten.
//! - Slot values are opaque text here; the program JSON is only understood
//!   by the repository layer.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "slot file uses schema version {db_version}; this build understands up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
