//! Record store contract and the in-memory store.
//!
//! The data center persists each project as one opaque text record keyed by
//! project id. Stores never look inside a record; the data center owns the
//! JSON envelope written into it:
//!
//! ```json
//! { "data": { ...project... }, "timestamp": 1717000000000, "version": "1.0" }
//! ```
//!
//! Records with another version, or that do not parse, are treated as absent
//! by the reader and can be purged with [`RecordStore::cleanup`].

use super::error::StoreError;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version tag written into every envelope.
pub const RECORD_VERSION: &str = "1.0";

/// Key-value storage for serialized records.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    async fn save(&self, id: &str, record: &str) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<Option<String>, StoreError>;

    async fn get_all(&self) -> Result<Vec<(String, String)>, StoreError>;

    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Frees space by dropping unreadable records. Returns how many were removed.
    async fn cleanup(&self) -> Result<usize, StoreError> {
        Ok(0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Wraps `data` in a versioned envelope.
pub fn seal<T: Serialize>(data: &T, now: NaiveDateTime) -> Result<String, StoreError> {
    let envelope = Envelope {
        data,
        timestamp: now.and_utc().timestamp_millis(),
        version: Some(RECORD_VERSION.to_string()),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Unwraps an envelope. The error is a human-readable reason the record was rejected.
pub fn unseal<T: DeserializeOwned>(record: &str) -> Result<T, String> {
    let envelope: Envelope<T> = serde_json::from_str(record).map_err(|e| format!("unreadable record: {}", e))?;
    match envelope.version.as_deref() {
        None | Some(RECORD_VERSION) => Ok(envelope.data),
        Some(other) => Err(format!("record version {} is not supported", other)),
    }
}

/// True when `record` is a parseable envelope of the current version.
pub fn is_readable(record: &str) -> bool {
    match serde_json::from_str::<Envelope<serde_json::Value>>(record) {
        Ok(envelope) => matches!(envelope.version.as_deref(), None | Some(RECORD_VERSION)),
        Err(_) => false,
    }
}

/// Process-local store, optionally bounded to emulate a storage quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses new keys once it holds `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            records: Mutex::new(BTreeMap::new()),
            capacity: Some(capacity),
        }
    }

    /// Stores `record` as-is, bypassing the capacity limit.
    pub fn insert_raw(&self, id: &str, record: &str) {
        self.records.lock().insert(id.to_string(), record.to_string());
    }

    pub fn raw(&self, id: &str) -> Option<String> {
        self.records.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl RecordStore for MemoryStore {
    async fn save(&self, id: &str, record: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock();
        if let Some(capacity) = self.capacity {
            if !records.contains_key(id) && records.len() >= capacity {
                return Err(StoreError::QuotaExceeded);
            }
        }
        records.insert(id.to_string(), record.to_string());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.lock().get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self.records.lock().iter().map(|(id, record)| (id.clone(), record.clone())).collect())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.lock().remove(id).is_some())
    }

    async fn cleanup(&self) -> Result<usize, StoreError> {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|_, record| is_readable(record));
        Ok(before - records.len())
    }
}
