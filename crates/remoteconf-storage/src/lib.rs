// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layer for remoteconf.
//!
//! Provides the [`ConfigurationCache`] used by the manager together with two
//! [`RecordStore`] implementations: an in-process [`MemoryStore`] and a
//! WAL-mode [`SqliteStore`] with embedded migrations.

pub mod cache;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod queries;

use std::sync::Arc;

use remoteconf_core::{RecordStore, RemoteConfigError};

pub use cache::{ConfigurationCache, StorageIdentifier};
pub use database::{IN_MEMORY_PATH, SqliteStore};
pub use memory::MemoryStore;
pub use models::ConfigurationContext;

/// Open the record store for `database_path`.
///
/// `":memory:"` selects a [`MemoryStore`]; any other path opens a [`SqliteStore`].
pub fn open_record_store(database_path: &str) -> Result<Arc<dyn RecordStore>, RemoteConfigError> {
    if database_path == IN_MEMORY_PATH {
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(SqliteStore::open(database_path)?))
}
