use crate::StoreError;
use analysis::AnalyzedString;
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for a storage backend holding analyzed strings keyed by content hash.
///
/// Implementations must make `insert_if_absent` atomic with respect to every
/// other operation: the existence check and the write happen as one step.
pub trait StoreBackend: Send + Sync {
    /// Store `record` under `key` unless the key is taken.
    /// Returns `false` (and stores nothing) when the key already exists.
    fn insert_if_absent(&self, key: &str, record: AnalyzedString) -> Result<bool, StoreError>;
    /// Retrieve a record by key.
    fn get(&self, key: &str) -> Result<Option<AnalyzedString>, StoreError>;
    /// Remove a record by key. Returns `false` if nothing was stored under it.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
    /// Visit every record in insertion order.
    fn scan(
        &self,
        visitor: &mut dyn FnMut(&AnalyzedString) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;
    /// Number of stored records.
    fn len(&self) -> Result<usize, StoreError>;
}

#[derive(Default)]
struct Entries {
    next_seq: u64,
    records: HashMap<String, (u64, AnalyzedString)>,
}

/// An in-memory backend using a `RwLock` around a `HashMap`.
///
/// Each record carries the sequence number it was inserted with so scans can
/// replay insertion order.
pub struct InMemoryBackend {
    entries: RwLock<Entries>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for InMemoryBackend {
    fn insert_if_absent(&self, key: &str, record: AnalyzedString) -> Result<bool, StoreError> {
        // The write lock covers both the existence check and the insert.
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        if guard.records.contains_key(key) {
            return Ok(false);
        }
        let seq = guard.next_seq;
        guard.next_seq += 1;
        guard.records.insert(key.to_string(), (seq, record));
        Ok(true)
    }

    fn get(&self, key: &str) -> Result<Option<AnalyzedString>, StoreError> {
        let guard = self
            .entries
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.records.get(key).map(|(_, record)| record.clone()))
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self
            .entries
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .records
            .remove(key)
            .is_some())
    }

    fn scan(
        &self,
        visitor: &mut dyn FnMut(&AnalyzedString) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        // A read lock is held for the duration of the scan.
        let guard = self
            .entries
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        let mut ordered: Vec<&(u64, AnalyzedString)> = guard.records.values().collect();
        ordered.sort_unstable_by_key(|(seq, _)| *seq);
        for (_, record) in ordered {
            visitor(record)?;
        }
        Ok(())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let guard = self
            .entries
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.records.len())
    }
}
