use super::database::{Connection, Database};
use super::kv_store::KeyValueStore;
use crate::models::datetime_to_timestamp;
use crate::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use std::path::Path;

/// Key-value store backed by the `kv_store` table of a SQLite file
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `db_path`
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Database::new(db_path).get_or_create()?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, datetime_to_timestamp(&Utc::now())],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}
