use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use crate::infra::sqlite::schema::{init_db, open_connection};
use crate::usecase::ports::kv::{KeyValueStore, StoreError};

pub fn get_blob(db_path: &Path, key: &str) -> Result<Option<Vec<u8>>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT value FROM kv_store WHERE key = ?1",
        [key],
        |row| row.get::<_, Vec<u8>>(0),
    )
    .optional()
    .with_context(|| format!("failed to read key: {key}"))
}

pub fn set_blob(db_path: &Path, key: &str, blob: &[u8]) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO kv_store(key, value, updated_at)
         VALUES (?1, ?2, CURRENT_TIMESTAMP)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, blob],
    )
    .with_context(|| format!("failed to write key: {key}"))?;
    Ok(())
}

pub fn remove_blob(db_path: &Path, key: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])
        .with_context(|| format!("failed to remove key: {key}"))?;
    Ok(())
}

pub struct SqliteKvStore {
    pub db_path: PathBuf,
}

impl SqliteKvStore {
    /// Opens the store, creating the database file and table when missing.
    pub fn open(db_path: PathBuf) -> Result<Self, StoreError> {
        init_db(&db_path).map_err(|err| StoreError::Message(format!("{err:#}")))?;
        Ok(Self { db_path })
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        get_blob(&self.db_path, key).map_err(|err| StoreError::Message(format!("{err:#}")))
    }

    fn set(&self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        debug!(key, bytes = blob.len(), "kv set");
        set_blob(&self.db_path, key, blob).map_err(|err| StoreError::Message(format!("{err:#}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        debug!(key, "kv remove");
        remove_blob(&self.db_path, key).map_err(|err| StoreError::Message(format!("{err:#}")))
    }
}
