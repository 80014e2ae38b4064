//! Storage slot contract with SQLite and in-memory backends.
//!
//! # Responsibility
//! - Define the minimal read/write contract used by persistence.
//! - Keep SQL details for the `storage_slots` table in one place.
//!
//! # Invariants
//! - `SqliteSlot` only accepts connections with migrations fully applied.
//! - Writes that would push total usage over the quota are rejected before
//!   any mutation.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default quota, matching the usual browser local storage allowance.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

pub type SlotResult<T> = Result<T, SlotError>;

#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        limit_bytes: usize,
    },
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "storage connection is at schema version {actual_version}, expected {expected_version}"
            ),
            Self::QuotaExceeded {
                key,
                required_bytes,
                limit_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes needed, limit {limit_bytes}"
            ),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named text slots backed by some durable medium.
pub trait StorageSlot {
    fn read(&self, key: &str) -> SlotResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> SlotResult<()>;
}

impl<S: StorageSlot + ?Sized> StorageSlot for &S {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> SlotResult<()> {
        (**self).write(key, value)
    }
}

/// SQLite-backed slots stored in `storage_slots`.
pub struct SqliteSlot<'conn> {
    conn: &'conn Connection,
    quota_bytes: Option<usize>,
}

impl<'conn> SqliteSlot<'conn> {
    /// Wraps a migrated connection using the default quota.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration.
    pub fn try_new(conn: &'conn Connection) -> SlotResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(SlotError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        Ok(Self {
            conn,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        })
    }

    /// Overrides the quota; `None` disables the check.
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    fn usage_excluding(&self, key: &str) -> SlotResult<usize> {
        let used: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM storage_slots
             WHERE key != ?1;",
            [key],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(used).unwrap_or(usize::MAX))
    }
}

impl StorageSlot for SqliteSlot<'_> {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> SlotResult<()> {
        if let Some(limit_bytes) = self.quota_bytes {
            let required_bytes = self.usage_excluding(key)? + key.len() + value.len();
            check_quota(key, required_bytes, limit_bytes)?;
        }

        self.conn.execute(
            "INSERT INTO storage_slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slots, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemorySlot {
    /// Creates an empty slot set without quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slot set limited to `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            values: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> SlotResult<()> {
        let mut values = self.values.borrow_mut();
        if let Some(limit_bytes) = self.quota_bytes {
            let used: usize = values
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, stored)| existing.len() + stored.len())
                .sum();
            check_quota(key, used + key.len() + value.len(), limit_bytes)?;
        }
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn check_quota(key: &str, required_bytes: usize, limit_bytes: usize) -> SlotResult<()> {
    if required_bytes > limit_bytes {
        warn!(
            "event=slot_write module=storage status=rejected reason=quota required_bytes={} limit_bytes={}",
            required_bytes, limit_bytes
        );
        return Err(SlotError::QuotaExceeded {
            key: key.to_string(),
            required_bytes,
            limit_bytes,
        });
    }
    Ok(())
}
