// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted configuration provider for deterministic testing.
//!
//! `MockProvider` implements [`Provider`] by replaying pre-configured
//! outcomes, so manager tests never touch the network.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use remoteconf_core::{Provider, RemoteConfigError};

type Outcome = Result<Vec<u8>, String>;

/// A provider that returns pre-configured fetch outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty the fetch
/// fails with a provider error.
#[derive(Clone, Default)]
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    urls: Arc<Mutex<Vec<String>>>,
    fetches: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a mock provider with an empty outcome queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider whose first fetch returns `body`.
    pub fn succeeding(body: impl Into<Vec<u8>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Ok(body.into())]))),
            ..Self::default()
        }
    }

    /// Create a mock provider whose first fetch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Err(message.into())]))),
            ..Self::default()
        }
    }

    /// Delay every fetch by `delay`, giving callers a window to cancel it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful fetch returning `body`.
    pub async fn push_success(&self, body: impl Into<Vec<u8>>) {
        self.outcomes.lock().await.push_back(Ok(body.into()));
    }

    /// Queue a failed fetch with the given provider message.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(message.into()));
    }

    /// Number of fetches started so far, including cancelled ones.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// URLs requested so far, in order.
    pub async fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().await.clone()
    }

    async fn next_outcome(&self) -> Outcome {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err("mock provider has no scripted response".to_string()))
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn fetch(&self, url: &str, cancel: CancellationToken) -> Result<Vec<u8>, RemoteConfigError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().await.push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::select! {
                () = cancel.cancelled() => {
                    return Err(RemoteConfigError::provider("mock request cancelled"));
                }
                () = tokio::time::sleep(delay) => {}
            }
        }

        self.next_outcome().await.map_err(RemoteConfigError::provider)
    }
}
