use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::domain::{StudentId, TeacherId};

/// Storage abstraction over durable per-owner key-value state, so the
/// dashboard services can run against any backend that speaks string keys
/// and string values.
pub trait RecordStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub(crate) fn applications_key(teacher: &TeacherId) -> String {
    format!("teacher:{}:applications", teacher.0)
}

pub(crate) fn contracts_key(teacher: &TeacherId) -> String {
    format!("teacher:{}:contracts", teacher.0)
}

pub(crate) fn payments_key(teacher: &TeacherId) -> String {
    format!("teacher:{}:payments", teacher.0)
}

pub(crate) fn reports_key(teacher: &TeacherId, student: &StudentId) -> String {
    format!("teacher:{}:students:{}:reports", teacher.0, student.0)
}

pub(crate) fn seeded_flag_key(teacher: &TeacherId) -> String {
    format!("teacher:{}:demo_seeded", teacher.0)
}

/// Read a collection, degrading to empty on absence, malformed payloads, or
/// store failure. Degradation is logged, never surfaced.
pub fn read_collection<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(key, error = %err, "record store read failed; returning empty collection");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(err) => {
            warn!(key, error = %err, "malformed collection payload; returning empty collection");
            Vec::new()
        }
    }
}

/// Overwrite a collection in full. Last write wins; there is no atomicity
/// across concurrent holders of the same store.
pub fn write_collection<T, S>(store: &S, key: &str, records: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: RecordStore + ?Sized,
{
    let payload = serde_json::to_string(records)?;
    store.put(key, payload)
}

/// Mutex-guarded map backend used by the service binary and tests.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl RecordStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.entries.lock().expect("store mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("store mutex poisoned");
        guard.insert(key.to_string(), value);
        Ok(())
    }
}
