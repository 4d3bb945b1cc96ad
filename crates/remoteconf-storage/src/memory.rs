// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process record store.

use std::collections::HashMap;

use parking_lot::RwLock;

use remoteconf_core::{RecordStore, RemoteConfigError};

/// A [`RecordStore`] that keeps records in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Vec<Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any record is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.records.read().contains_key(key)
    }
}

impl RecordStore for MemoryStore {
    fn first(&self, key: &str) -> Result<Option<Vec<u8>>, RemoteConfigError> {
        Ok(self
            .records
            .read()
            .get(key)
            .and_then(|records| records.first().cloned()))
    }

    fn replace_all(&self, key: &str, records: Vec<Vec<u8>>) -> Result<(), RemoteConfigError> {
        let mut guard = self.records.write();
        if records.is_empty() {
            guard.remove(key);
        } else {
            guard.insert(key.to_string(), records);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_and_read_first() {
        let store = MemoryStore::new();
        assert!(store.first("key").unwrap().is_none());

        store
            .replace_all("key", vec![b"a".to_vec(), b"b".to_vec()])
            .unwrap();
        assert_eq!(store.first("key").unwrap(), Some(b"a".to_vec()));
        assert!(store.contains("key"));

        store.replace_all("key", vec![]).unwrap();
        assert!(!store.contains("key"));
    }
}
