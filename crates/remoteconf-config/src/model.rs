// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings model structs for remoteconf.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! keys at startup, providing actionable error messages.

use remoteconf_core::{Locale, ResolveContext};
use serde::{Deserialize, Serialize};

/// Top-level remoteconf settings.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfSettings {
    /// Where the remote configuration is fetched from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Persisted cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Bundled fallback configuration.
    #[serde(default)]
    pub bundle: BundleConfig,

    /// Locale and platform overrides used when resolving update alerts.
    #[serde(default)]
    pub client: ClientConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// URL of the configuration document.
    #[serde(default)]
    pub url: String,

    /// Timeout for a single fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Persisted cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Skip the persisted cache when the fetch fails.
    #[serde(default)]
    pub ignore_cache: bool,

    /// Path to the SQLite database file; `:memory:` keeps the cache in process.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ignore_cache: false,
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "remoteconf.db".to_string()
}

/// Bundled fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Name of the bundled file, with a `.json` suffix or none at all.
    #[serde(default)]
    pub filename: Option<String>,

    /// Directory containing bundled files.
    #[serde(default = "default_bundle_directory")]
    pub directory: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            filename: None,
            directory: default_bundle_directory(),
        }
    }
}

fn default_bundle_directory() -> String {
    ".".to_string()
}

/// Locale and platform overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Locale used to pick localized alerts (e.g. `de-DE`). Detected when unset.
    #[serde(default)]
    pub locale: Option<String>,

    /// Platform version matched against `ignoredOSVersions`. Detected when unset.
    #[serde(default)]
    pub system_version: Option<String>,
}

impl ClientConfig {
    /// Builds the resolve context, detecting whatever is not overridden.
    ///
    /// An unparseable locale override falls back to detection; validation
    /// reports it separately.
    pub fn resolve_context(&self) -> ResolveContext {
        let detected = ResolveContext::detect();
        let locale = self
            .locale
            .as_deref()
            .and_then(|l| Locale::parse(l).ok())
            .unwrap_or(detected.locale);
        let system_version = self
            .system_version
            .clone()
            .unwrap_or(detected.system_version);
        ResolveContext::new(locale, system_version)
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
