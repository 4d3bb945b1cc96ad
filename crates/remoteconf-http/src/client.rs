// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest-backed [`Provider`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use remoteconf_config::model::SourceConfig;
use remoteconf_core::{Provider, RemoteConfigError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches configuration payloads over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
}

impl HttpProvider {
    /// Creates a provider whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, RemoteConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("remoteconf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteConfigError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }

    /// Creates a provider from the `[source]` settings section.
    pub fn from_settings(source: &SourceConfig) -> Result<Self, RemoteConfigError> {
        Self::new(Duration::from_secs(source.timeout_secs))
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, RemoteConfigError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteConfigError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, url, "configuration response received");

        if !status.is_success() {
            warn!(status = %status, url, "configuration request rejected");
            return Err(RemoteConfigError::provider(format!(
                "Remote Configuration request returned {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteConfigError::Provider {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        if body.is_empty() {
            return Err(RemoteConfigError::provider(
                "Remote Configuration response does not contain body data.",
            ));
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn fetch(&self, url: &str, cancel: CancellationToken) -> Result<Vec<u8>, RemoteConfigError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(url, "configuration request cancelled before completion");
                Err(RemoteConfigError::provider("configuration request cancelled"))
            }
            result = self.get(url) => result,
        }
    }
}
