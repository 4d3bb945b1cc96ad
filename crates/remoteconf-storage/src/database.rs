// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed record store with PRAGMA setup and embedded migrations.
//!
//! All access goes through one `rusqlite::Connection` behind a mutex, so the
//! store is its own single writer.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::debug;

use remoteconf_core::{RecordStore, RemoteConfigError};

use crate::migrations::run_migrations;
use crate::queries::records;

/// Path that opens a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// A [`RecordStore`] persisted in a SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run pending migrations.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RemoteConfigError> {
        let path = path.as_ref();
        let mut conn = if path == Path::new(IN_MEMORY_PATH) {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(RemoteConfigError::storage)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(RemoteConfigError::storage)?;
        run_migrations(&mut conn)?;

        debug!(path = %path.display(), "SQLite record store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of records stored under `key`.
    pub fn count(&self, key: &str) -> Result<usize, RemoteConfigError> {
        let count = records::count_records(&self.conn.lock(), key)
            .map_err(RemoteConfigError::storage)?;
        Ok(count as usize)
    }
}

impl RecordStore for SqliteStore {
    fn first(&self, key: &str) -> Result<Option<Vec<u8>>, RemoteConfigError> {
        records::first_record(&self.conn.lock(), key).map_err(RemoteConfigError::storage)
    }

    fn replace_all(&self, key: &str, records: Vec<Vec<u8>>) -> Result<(), RemoteConfigError> {
        records::replace_records(&mut self.conn.lock(), key, &records)
            .map_err(RemoteConfigError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_starts_empty() {
        let store = SqliteStore::open(IN_MEMORY_PATH).unwrap();
        assert!(store.first("missing").unwrap().is_none());
        assert_eq!(store.count("missing").unwrap(), 0);
    }

    #[test]
    fn replace_all_keeps_order_and_overwrites() {
        let store = SqliteStore::open(IN_MEMORY_PATH).unwrap();
        store
            .replace_all("key", vec![b"one".to_vec(), b"two".to_vec()])
            .unwrap();
        assert_eq!(store.first("key").unwrap().as_deref(), Some(&b"one"[..]));
        assert_eq!(store.count("key").unwrap(), 2);

        store.replace_all("key", vec![b"three".to_vec()]).unwrap();
        assert_eq!(store.first("key").unwrap().as_deref(), Some(&b"three"[..]));
        assert_eq!(store.count("key").unwrap(), 1);
    }

    #[test]
    fn empty_replace_removes_key() {
        let store = SqliteStore::open(IN_MEMORY_PATH).unwrap();
        store.replace_all("key", vec![b"value".to_vec()]).unwrap();
        store.replace_all("key", vec![]).unwrap();
        assert!(store.first("key").unwrap().is_none());
    }

    #[test]
    fn keys_are_independent() {
        let store = SqliteStore::open(IN_MEMORY_PATH).unwrap();
        store.replace_all("a", vec![b"1".to_vec()]).unwrap();
        store.replace_all("b", vec![b"2".to_vec()]).unwrap();
        store.replace_all("a", vec![]).unwrap();
        assert_eq!(store.first("b").unwrap().as_deref(), Some(&b"2"[..]));
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remoteconf.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.replace_all("key", vec![b"persisted".to_vec()]).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.first("key").unwrap().as_deref(), Some(&b"persisted"[..]));
    }
}
