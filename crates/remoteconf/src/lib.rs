// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote configuration resolution.
//!
//! The [`Manager`] fetches a configuration document through a
//! [`Provider`](remoteconf_core::Provider), falls back to the persisted cache
//! and then to a bundled file when the fetch fails, and resolves the
//! effective update type for the running installation. The
//! [`UpdateDecisionHandler`] turns a resolved state into the alert a client
//! should present and records discard decisions.

pub mod bundle;
pub mod handler;
pub mod json;
pub mod manager;

pub use bundle::DirectoryBundle;
pub use handler::{AlertPrompt, SelectionOutcome, UpdateAction, UpdateDecisionHandler};
pub use json::{DefaultConfiguration, JsonDeserializer};
pub use manager::{Manager, ResolvedState, SUPERSEDED_MESSAGE};
