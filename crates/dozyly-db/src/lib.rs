//! Storage layer for Dozyly.
//!
//! Provides a persistent key-value [`Storage`] backend using `rusqlite`. The
//! sleep log is kept the way a browser keeps local storage: a handful of
//! string keys, each holding one string value.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! # Schema
//!
//! A single `storage` table maps `key` (primary key) to `value`. Values are
//! opaque to this crate; the entry list is a JSON array written by
//! [`dozyly_core::EntryStore`]. There is no schema versioning: the table shape
//! is fixed and values carry their own format.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use dozyly_core::Storage;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Lists stored keys in ascending order.
    #[cfg(test)]
    fn keys(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM storage ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }
}

const UPSERT: &str = "
    INSERT INTO storage (key, value) VALUES (?, ?)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value
";

impl Storage for Database {
    type Error = DbError;

    fn get_item(&self, key: &str) -> Result<Option<String>, DbError> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM storage WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        tracing::debug!(key, found = value.is_some(), "read storage item");
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(UPSERT, params![key, value])?;
        Ok(())
    }

    /// Writes every pair in one transaction.
    fn set_items(&mut self, items: &[(&str, &str)]) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT)?;
            for (key, value) in items {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        tracing::debug!(count = items.len(), "wrote storage items");
        Ok(())
    }
}
