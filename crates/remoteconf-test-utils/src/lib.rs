// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for remoteconf integration tests.
//!
//! Provides scripted collaborators and payload builders for fast,
//! deterministic tests without a network or a database.
//!
//! # Components
//!
//! - [`MockProvider`] - Provider replaying queued successes and failures
//! - [`FailingStore`] - Record store whose every operation fails
//! - [`fixtures`] - Builders for configuration JSON payloads

pub mod failing_store;
pub mod fixtures;
pub mod mock_provider;

pub use failing_store::FailingStore;
pub use mock_provider::MockProvider;
