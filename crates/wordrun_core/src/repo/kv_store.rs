//! String key-value store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Offer `get/set/remove` over string keys and string values.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set_item` is an upsert; a key holds at most one value.
//! - `remove_item` on a missing key is not an error.

use crate::db::DbResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Minimal persistent mapping of string keys to string values.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> DbResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> DbResult<()>;
    fn remove_item(&self, key: &str) -> DbResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> DbResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> DbResult<()> {
        (**self).remove_item(key)
    }
}

/// SQLite-backed key-value store on the `kv_store` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DbResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
