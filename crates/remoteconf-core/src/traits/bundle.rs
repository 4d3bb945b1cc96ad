// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only source of bundled configuration files.

/// Extension of bundled configuration files.
pub const BUNDLE_EXTENSION: &str = "json";

/// Looks up a bundled resource by logical name.
pub trait BundleSource: Send + Sync {
    /// Returns the bytes of the resource named `name`, or `None` if it is
    /// missing or unreadable.
    ///
    /// `name` is already normalized (see [`normalize_bundle_name`]).
    fn load(&self, name: &str) -> Option<Vec<u8>>;
}

/// Strips a trailing `.json` suffix, so `defaults` and `defaults.json` name
/// the same resource.
pub fn normalize_bundle_name(name: &str) -> &str {
    name.strip_suffix(".json").unwrap_or(name)
}
