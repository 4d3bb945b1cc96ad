// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for settings values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, bundle file suffixes and parseable locale overrides.

use remoteconf_core::Locale;

use crate::diagnostic::ConfigError;
use crate::model::RemoteConfSettings;

/// Validate deserialized settings for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RemoteConfSettings) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let url = config.source.url.trim();
    if url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "source.url must not be empty".to_string(),
        });
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("source.url `{url}` must use the http or https scheme"),
        });
    }

    if config.source.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "source.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.cache.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "cache.database_path must not be empty".to_string(),
        });
    }

    if let Some(filename) = &config.bundle.filename
        && let Some(message) = bundle_filename_error(filename)
    {
        errors.push(ConfigError::Validation { message });
    }

    if config.bundle.directory.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bundle.directory must not be empty".to_string(),
        });
    }

    if let Some(locale) = &config.client.locale
        && let Err(e) = Locale::parse(locale)
    {
        errors.push(ConfigError::Validation {
            message: format!("client.locale: {e}"),
        });
    }

    if let Some(version) = &config.client.system_version
        && version.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "client.system_version must not be empty when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Bundle files must end in `.json` or carry no suffix at all.
fn bundle_filename_error(filename: &str) -> Option<String> {
    let name = filename.trim();
    if name.is_empty() {
        return Some("bundle.filename must not be empty when set".to_string());
    }
    let stem = name.strip_suffix(".json").unwrap_or(name);
    if stem.is_empty() || stem.contains('.') || stem.contains('/') {
        return Some(format!(
            "bundle.filename `{name}` must be a plain name with a `.json` suffix or no suffix"
        ));
    }
    None
}
