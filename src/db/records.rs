//! SQLite-backed record store.
//!
//! Records of every collection share one table. A collection plays the role
//! of a key prefix, so several stores can live in one database file.

use super::db::Db;
use crate::libs::error::StoreError;
use crate::libs::store::{is_readable, RecordStore};
use parking_lot::Mutex;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::sync::Arc;

const SCHEMA_RECORDS: &str = "CREATE TABLE IF NOT EXISTS records (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    data TEXT NOT NULL,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (collection, id)
);";
const UPSERT_RECORD: &str = "INSERT INTO records (collection, id, data, updated_at) VALUES (?1, ?2, ?3, datetime(CURRENT_TIMESTAMP, 'localtime'))
    ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at";
const SELECT_RECORD: &str = "SELECT data FROM records WHERE collection = ?1 AND id = ?2";
const SELECT_RECORDS: &str = "SELECT id, data FROM records WHERE collection = ?1 ORDER BY id";
const COUNT_RECORDS: &str = "SELECT COUNT(*) FROM records WHERE collection = ?1";
const RECORD_EXISTS: &str = "SELECT 1 FROM records WHERE collection = ?1 AND id = ?2";
const DELETE_RECORD: &str = "DELETE FROM records WHERE collection = ?1 AND id = ?2";

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    collection: String,
    max_records: Option<usize>,
}

impl SqliteStore {
    pub fn new(db: Db, collection: &str) -> Result<SqliteStore, StoreError> {
        db.conn.execute(SCHEMA_RECORDS, [])?;

        Ok(SqliteStore {
            conn: Arc::new(Mutex::new(db.conn)),
            collection: collection.to_string(),
            max_records: None,
        })
    }

    /// Refuses new records once the collection holds `max_records`.
    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn map_error(err: rusqlite::Error) -> StoreError {
        match err.sqlite_error_code() {
            Some(ErrorCode::DiskFull) => StoreError::QuotaExceeded,
            _ => StoreError::Sqlite(err),
        }
    }
}

impl RecordStore for SqliteStore {
    async fn save(&self, id: &str, record: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        if let Some(max_records) = self.max_records {
            let exists = conn.query_row(RECORD_EXISTS, params![self.collection, id], |_| Ok(())).optional()?.is_some();
            let count: i64 = conn.query_row(COUNT_RECORDS, params![self.collection], |row| row.get(0))?;
            if !exists && count as usize >= max_records {
                return Err(StoreError::QuotaExceeded);
            }
        }
        conn.execute(UPSERT_RECORD, params![self.collection, id, record]).map_err(Self::map_error)?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock();
        let record = conn.query_row(SELECT_RECORD, params![self.collection, id], |row| row.get(0)).optional()?;
        Ok(record)
    }

    async fn get_all(&self) -> Result<Vec<(String, String)>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_RECORDS)?;
        let rows = stmt.query_map(params![self.collection], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock();
        let removed = conn.execute(DELETE_RECORD, params![self.collection, id])?;
        Ok(removed > 0)
    }

    async fn cleanup(&self) -> Result<usize, StoreError> {
        let unreadable: Vec<String> = self.get_all().await?.into_iter().filter(|(_, record)| !is_readable(record)).map(|(id, _)| id).collect();
        let conn = self.conn.lock();
        for id in &unreadable {
            conn.execute(DELETE_RECORD, params![self.collection, id])?;
        }
        Ok(unreadable.len())
    }
}
