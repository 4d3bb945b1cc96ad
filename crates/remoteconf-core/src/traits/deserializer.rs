// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deserializer trait and the configuration contract it produces.

use crate::error::RemoteConfigError;
use crate::update_context::UpdateContext;

/// A decoded configuration payload exposing its update information.
pub trait Configuration {
    fn app_update(&self) -> &UpdateContext;
}

/// Converts raw payload bytes into a typed [`Configuration`].
///
/// Implementations must be deterministic. Rejected payloads are reported as
/// [`RemoteConfigError::Deserializer`], invariant violations as
/// [`RemoteConfigError::Validation`].
pub trait Deserializer {
    type Model: Configuration;

    fn deserialize(&self, data: &[u8]) -> Result<Self::Model, RemoteConfigError>;
}
