// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the resolver, the manager, and the decision handler.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How an update is to be treated by the client application.
///
/// `Discarded` is never decoded from a payload. It is computed per request
/// from the persisted discard record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UpdateType {
    /// No alert necessary.
    #[default]
    Ignore,
    /// An alert should be shown but may be skipped by the user.
    Recommended,
    /// An alert must be shown and must not be skipped.
    Mandatory,
    /// A recommended update the user already discarded for this version.
    Discarded,
}

/// How often a recommended update alert is presented for one version.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertFrequency {
    /// Present the alert after every resolution.
    #[default]
    Always,
    /// Present the alert until the user discards it for this version.
    Once,
}

/// Which source produced a resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Origin {
    /// Live fetch through the provider.
    Provider,
    /// The last successfully fetched payload from the persisted cache.
    Cache,
    /// The bundled default configuration file.
    Bundle,
}

/// An option offered to the user within an update alert.
///
/// ```json
/// { "title": "Aktualisieren", "isUpdateAction": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOption {
    /// The text displayed for the option.
    pub title: String,

    /// Whether selecting the option triggers the update.
    #[serde(default)]
    pub is_update_action: bool,
}

impl UpdateOption {
    pub fn new(title: impl Into<String>, is_update_action: bool) -> Self {
        Self {
            title: title.into(),
            is_update_action,
        }
    }
}

/// Lookup of the update action within a list of options.
pub trait UpdateOptions {
    /// Returns the first option flagged as the update action, if any.
    fn update_action_option(&self) -> Option<&UpdateOption>;
}

impl UpdateOptions for [UpdateOption] {
    fn update_action_option(&self) -> Option<&UpdateOption> {
        self.iter().find(|option| option.is_update_action)
    }
}

/// A localized update alert.
///
/// ```json
/// {
///     "languageCode": "de",
///     "regionCode": "DE",
///     "title": "Aktualisierung verfügbar",
///     "text": "Es steht eine empfohlene Aktualisierung zur Verfügung.",
///     "options": [
///         { "title": "Nein" },
///         { "title": "Aktualisieren", "isUpdateAction": true }
///     ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlert {
    /// Language of the strings (e.g. `en`).
    #[serde(default)]
    pub language_code: Option<String>,

    /// Region of the strings (e.g. `US`).
    #[serde(default)]
    pub region_code: Option<String>,

    pub title: String,
    pub text: String,
    pub options: Vec<UpdateOption>,
}

/// Platform versions for which a mandatory update may be ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandatoryVersioning {
    /// Version of the running platform (e.g. `12.1.3`).
    pub system_version: String,

    /// Dotted version prefixes exempt from mandatory updates (e.g. `12`, `12.1`).
    pub ignored_versions: Vec<String>,
}

impl MandatoryVersioning {
    pub fn new(system_version: impl Into<String>, ignored_versions: Vec<String>) -> Self {
        Self {
            system_version: system_version.into(),
            ignored_versions,
        }
    }

    /// Whether a mandatory update can be ignored on the running platform.
    pub fn can_be_ignored(&self) -> bool {
        crate::versioning::can_be_ignored(&self.system_version, &self.ignored_versions)
    }
}
