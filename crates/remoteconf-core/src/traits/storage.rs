// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for the persistence collaborator.

use crate::error::RemoteConfigError;

/// A key-addressed store of opaque records.
///
/// Each key holds an ordered list of records. Implementations must make a
/// single [`replace_all`](RecordStore::replace_all) call crash-consistent.
pub trait RecordStore: Send + Sync {
    /// Returns the first record stored under `key`, if any.
    fn first(&self, key: &str) -> Result<Option<Vec<u8>>, RemoteConfigError>;

    /// Replaces every record under `key`. An empty list removes the key.
    fn replace_all(&self, key: &str, records: Vec<Vec<u8>>) -> Result<(), RemoteConfigError>;
}
