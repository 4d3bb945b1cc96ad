// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for fetching raw configuration bytes.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RemoteConfigError;

/// Loads the raw configuration payload from a remote source.
///
/// `cancel` is triggered when the manager supersedes the request with a newer
/// one. Honouring it is best effort: the manager stops waiting on the fetch
/// either way, and a token cancelled after completion has no effect.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Fetches the payload located at `url`.
    ///
    /// Failures must be reported as [`RemoteConfigError::Provider`].
    async fn fetch(&self, url: &str, cancel: CancellationToken)
    -> Result<Vec<u8>, RemoteConfigError>;
}
