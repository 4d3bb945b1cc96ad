// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the configuration manager.
//!
//! Each collaborator is a narrow capability: the manager never depends on a
//! concrete transport, decoder, persistence engine or resource container.

pub mod bundle;
pub mod deserializer;
pub mod provider;
pub mod storage;

pub use bundle::BundleSource;
pub use deserializer::{Configuration, Deserializer};
pub use provider::Provider;
pub use storage::RecordStore;
