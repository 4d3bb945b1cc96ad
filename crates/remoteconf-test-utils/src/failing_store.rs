// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A record store that rejects every operation.

use std::sync::atomic::{AtomicUsize, Ordering};

use remoteconf_core::{RecordStore, RemoteConfigError};

/// Record store simulating an unavailable persistence backend.
#[derive(Debug, Default)]
pub struct FailingStore {
    attempts: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reads and writes attempted against the store.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail(&self) -> RemoteConfigError {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        RemoteConfigError::storage(std::io::Error::other("record store unavailable"))
    }
}

impl RecordStore for FailingStore {
    fn first(&self, _key: &str) -> Result<Option<Vec<u8>>, RemoteConfigError> {
        Err(self.fail())
    }

    fn replace_all(&self, _key: &str, _records: Vec<Vec<u8>>) -> Result<(), RemoteConfigError> {
        Err(self.fail())
    }
}
