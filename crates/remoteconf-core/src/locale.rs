// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locale parsing and localized alert selection.

use std::fmt;
use std::str::FromStr;

use crate::error::RemoteConfigError;
use crate::types::UpdateAlert;

/// Language assumed when the locale does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Environment variables consulted by [`Locale::from_env`], in priority order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A language with an optional region, e.g. `de-DE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn new(language: impl Into<String>, region: Option<&str>) -> Self {
        Self {
            language: language.into().to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        }
    }

    /// Parses `de`, `de-DE`, `de_DE` and POSIX forms such as `de_DE.UTF-8@euro`.
    pub fn parse(value: &str) -> Result<Self, RemoteConfigError> {
        let tag = value
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        let mut parts = tag.split(['-', '_']);
        let language = parts.next().unwrap_or_default();

        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RemoteConfigError::Config(format!(
                "invalid locale `{value}`: expected a language code such as `en` or `de-DE`"
            )));
        }

        let region = parts
            .next()
            .filter(|r| !r.is_empty() && r.chars().all(|c| c.is_ascii_alphanumeric()));
        Ok(Self::new(language, region))
    }

    /// Reads the locale from `LC_ALL`, `LC_MESSAGES` or `LANG`.
    ///
    /// Unset, empty, `C` and `POSIX` values are skipped. Falls back to
    /// [`DEFAULT_LANGUAGE`] without a region.
    pub fn from_env() -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .filter(|value| !value.is_empty() && value != "C" && value != "POSIX")
            .find_map(|value| Self::parse(&value).ok())
            .unwrap_or_default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, None)
    }
}

impl FromStr for Locale {
    type Err = RemoteConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

/// Selects the alert that best matches `locale`.
///
/// Priority: language and region match (first one wins), then the last alert
/// matching the language only, then the first alert in the list.
pub fn select_alert<'a>(alerts: &'a [UpdateAlert], locale: &Locale) -> Option<&'a UpdateAlert> {
    let mut language_match = None;

    for alert in alerts {
        if !code_matches(alert.language_code.as_deref(), Some(locale.language())) {
            continue;
        }
        if alert.region_code.is_some() && code_matches(alert.region_code.as_deref(), locale.region()) {
            return Some(alert);
        }
        language_match = Some(alert);
    }

    language_match.or_else(|| alerts.first())
}

// Codes compare exactly; `Locale` normalizes its own casing, alerts are taken as written.
fn code_matches(code: Option<&str>, target: Option<&str>) -> bool {
    matches!((code, target), (Some(code), Some(target)) if code == target)
}
