// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP provider for remoteconf.
//!
//! [`HttpProvider`] implements [`Provider`] with a plain `GET` against the
//! configuration URL. Transport failures, non-success statuses and empty
//! bodies are all reported as provider errors so the manager can fall back
//! to its cache or bundle.

pub mod client;

pub use client::{DEFAULT_TIMEOUT, HttpProvider};
