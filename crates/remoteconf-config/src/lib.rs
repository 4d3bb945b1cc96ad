// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings system for remoteconf.
//!
//! Provides TOML settings parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use remoteconf_config::load_and_validate;
//!
//! let settings = load_and_validate().expect("settings errors");
//! println!("Fetching from: {}", settings.source.url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::RemoteConfSettings;

use tracing::debug;

/// Load settings from the XDG hierarchy and validate them.
///
/// 1. Loads settings from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to miette diagnostics with typo suggestions
pub fn load_and_validate() -> Result<RemoteConfSettings, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => validated(config),
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load settings from a specific file (plus env overrides) and validate them.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<RemoteConfSettings, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => validated(config),
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load settings from a TOML string and validate them.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<RemoteConfSettings, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => validated(config),
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

fn validated(config: RemoteConfSettings) -> Result<RemoteConfSettings, Vec<ConfigError>> {
    validation::validate_config(&config)?;
    debug!(
        url = %config.source.url,
        database = %config.cache.database_path,
        bundle = ?config.bundle.filename,
        "settings loaded"
    );
    Ok(config)
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string(loader::LOCAL_CONFIG_PATH) {
        let path = std::env::current_dir()
            .map(|d| d.join(loader::LOCAL_CONFIG_PATH).display().to_string())
            .unwrap_or_else(|_| loader::LOCAL_CONFIG_PATH.to_string());
        sources.push((path, content));
    }

    if let Some(path) = loader::user_config_path()
        && let Ok(content) = std::fs::read_to_string(&path)
    {
        sources.push((path.display().to_string(), content));
    }

    if let Ok(content) = std::fs::read_to_string(loader::SYSTEM_CONFIG_PATH) {
        sources.push((loader::SYSTEM_CONFIG_PATH.to_string(), content));
    }

    sources
}
