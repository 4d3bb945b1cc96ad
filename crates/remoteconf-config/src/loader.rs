// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings loader using Figment for layered merging.
//!
//! Supports XDG hierarchy: `./remoteconf.toml` > `~/.config/remoteconf/remoteconf.toml`
//! > `/etc/remoteconf/remoteconf.toml` with environment variable overrides via
//! the `REMOTECONF_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RemoteConfSettings;

/// System-wide settings file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/remoteconf/remoteconf.toml";

/// Settings file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "remoteconf.toml";

/// Load settings from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/remoteconf/remoteconf.toml` (system-wide)
/// 3. `~/.config/remoteconf/remoteconf.toml` (user XDG config)
/// 4. `./remoteconf.toml` (local directory)
/// 5. `REMOTECONF_*` environment variables
pub fn load_config() -> Result<RemoteConfSettings, figment::Error> {
    build_figment().extract()
}

/// Load settings from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RemoteConfSettings, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RemoteConfSettings::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load settings from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RemoteConfSettings, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RemoteConfSettings::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for settings loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RemoteConfSettings::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// `~/.config/remoteconf/remoteconf.toml`, when a config directory exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("remoteconf/remoteconf.toml"))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `REMOTECONF_CACHE_IGNORE_CACHE` must map to
/// `cache.ignore_cache`, not `cache.ignore.cache`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("REMOTECONF_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    key.replacen("source_", "source.", 1)
        .replacen("cache_", "cache.", 1)
        .replacen("bundle_", "bundle.", 1)
        .replacen("client_", "client.", 1)
        .replacen("logging_", "logging.", 1)
}
