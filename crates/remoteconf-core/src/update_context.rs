// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding and validation of the `appUpdate` section of a configuration.
//!
//! [`RawUpdateContext`] is the wire shape. It becomes an [`UpdateContext`]
//! only through [`RawUpdateContext::resolve`], which applies defaults, drops
//! malformed alerts and enforces that recommended and mandatory updates carry
//! an alert with an update action for the active locale.
//!
//! ```json
//! "appUpdate": {
//!     "availableVersion": "1.6.0",
//!     "type": "recommended",
//!     "frequency": "once",
//!     "url": "https://apps.example.com/app/id346997126",
//!     "ignoredOSVersions": ["12", "13.1"],
//!     "localizedStrings": [
//!         {
//!             "languageCode": "de",
//!             "regionCode": "DE",
//!             "title": "Aktualisierung verfügbar",
//!             "text": "Möchten Sie die Aktualisierung jetzt installieren?",
//!             "options": [
//!                 { "title": "Nein" },
//!                 { "title": "Aktualisieren", "isUpdateAction": true }
//!             ]
//!         }
//!     ]
//! }
//! ```

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RemoteConfigError;
use crate::locale::{Locale, select_alert};
use crate::types::{AlertFrequency, MandatoryVersioning, UpdateAlert, UpdateOptions, UpdateType};

/// Version reported when the platform version cannot be detected.
pub const UNKNOWN_SYSTEM_VERSION: &str = "0";

/// Runtime facts the resolver needs: who is reading the alert, on what platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    pub locale: Locale,
    pub system_version: String,
}

impl ResolveContext {
    pub fn new(locale: Locale, system_version: impl Into<String>) -> Self {
        Self {
            locale,
            system_version: system_version.into(),
        }
    }

    /// Detects the locale from the environment and the OS version via `sysinfo`.
    pub fn detect() -> Self {
        let system_version = sysinfo::System::os_version()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SYSTEM_VERSION.to_string());
        Self::new(Locale::from_env(), system_version)
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(Locale::default(), UNKNOWN_SYSTEM_VERSION)
    }
}

/// The `appUpdate` section as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUpdateContext {
    #[serde(rename = "url")]
    pub update_url: String,

    #[serde(rename = "availableVersion")]
    pub available_version: String,

    #[serde(rename = "frequency", default)]
    pub alert_frequency: Option<AlertFrequency>,

    #[serde(rename = "type", default)]
    pub update_type: Option<UpdateType>,

    #[serde(rename = "ignoredOSVersions", default)]
    pub ignored_os_versions: Option<Vec<String>>,

    #[serde(rename = "localizedStrings", default)]
    localized_alerts: Option<Vec<LenientAlert>>,
}

/// An entry of `localizedStrings` that may fail to decode on its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LenientAlert {
    Valid(UpdateAlert),
    Malformed(IgnoredAny),
}

impl LenientAlert {
    fn into_alert(self) -> Option<UpdateAlert> {
        match self {
            Self::Valid(alert) => Some(alert),
            Self::Malformed(_) => None,
        }
    }
}

/// Validated update information for the running application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContext {
    /// The URL to open on update action.
    pub update_url: String,

    /// The version of the available update.
    pub available_version: String,

    /// How often a recommended update alert is presented.
    pub alert_frequency: AlertFrequency,

    /// The decoded update type; never [`UpdateType::Discarded`].
    pub update_type: UpdateType,

    /// Platform versions exempt from a mandatory update.
    pub mandatory_versioning: MandatoryVersioning,

    /// Localized alerts, absent when the payload did not define any.
    pub localized_alerts: Option<Vec<UpdateAlert>>,

    /// The locale the alerts were validated against.
    #[serde(skip)]
    pub locale: Locale,
}

impl UpdateContext {
    /// The alert for the locale this context was resolved with.
    ///
    /// For recommended and mandatory updates this is the alert whose update
    /// action was checked by [`RawUpdateContext::resolve`].
    pub fn localized_alert(&self) -> Option<&UpdateAlert> {
        select_alert(self.localized_alerts.as_deref()?, &self.locale)
    }
}

impl RawUpdateContext {
    /// Applies defaults and validates the update invariants.
    pub fn resolve(self, context: &ResolveContext) -> Result<UpdateContext, RemoteConfigError> {
        let update_type = self.update_type.unwrap_or_default();

        let localized_alerts = self.localized_alerts.map(|entries| {
            let declared = entries.len();
            let alerts: Vec<UpdateAlert> =
                entries.into_iter().filter_map(LenientAlert::into_alert).collect();
            if alerts.len() < declared {
                warn!(
                    dropped = declared - alerts.len(),
                    version = %self.available_version,
                    "dropped malformed localized update alerts"
                );
            }
            alerts
        });

        match update_type {
            UpdateType::Ignore => {}
            UpdateType::Discarded => {
                return Err(RemoteConfigError::Validation(
                    "Update type `discarded` is derived at runtime and cannot be declared by a configuration."
                        .into(),
                ));
            }
            UpdateType::Recommended | UpdateType::Mandatory => {
                let alert = localized_alerts
                    .as_deref()
                    .and_then(|alerts| select_alert(alerts, &context.locale))
                    .ok_or_else(|| {
                        RemoteConfigError::Validation(
                            "Recommended and Mandatory updates require at least one update alert with options."
                                .into(),
                        )
                    })?;
                if alert.options.update_action_option().is_none() {
                    return Err(RemoteConfigError::Validation(
                        "Recommended and Mandatory updates require their update options to define an update action."
                            .into(),
                    ));
                }
            }
        }

        Ok(UpdateContext {
            update_url: self.update_url,
            available_version: self.available_version,
            alert_frequency: self.alert_frequency.unwrap_or_default(),
            update_type,
            mandatory_versioning: MandatoryVersioning::new(
                context.system_version.clone(),
                self.ignored_os_versions.unwrap_or_default(),
            ),
            localized_alerts,
            locale: context.locale.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use tracing_test::traced_test;

    fn resolve(value: serde_json::Value) -> Result<UpdateContext, RemoteConfigError> {
        let raw: RawUpdateContext = serde_json::from_value(value).expect("wire shape");
        raw.resolve(&ResolveContext::new(Locale::parse("de-DE").unwrap(), "12.1.3"))
    }

    fn update_alert(language: &str, options: serde_json::Value) -> serde_json::Value {
        json!({
            "languageCode": language,
            "title": "Update",
            "text": "A new version is available.",
            "options": options
        })
    }

    #[test]
    fn defaults_apply_to_missing_keys() {
        let context = resolve(json!({"url": "https://example.com", "availableVersion": "1.3"})).unwrap();
        assert_eq!(context.update_type, UpdateType::Ignore);
        assert_eq!(context.alert_frequency, AlertFrequency::Always);
        assert!(context.mandatory_versioning.ignored_versions.is_empty());
        assert_eq!(context.mandatory_versioning.system_version, "12.1.3");
        assert!(context.localized_alerts.is_none());
    }

    #[test]
    fn required_keys_fail_the_wire_decode() {
        let missing_url = json!({"availableVersion": "1.3"});
        assert!(serde_json::from_value::<RawUpdateContext>(missing_url).is_err());

        let missing_version = json!({"url": "https://example.com"});
        assert!(serde_json::from_value::<RawUpdateContext>(missing_version).is_err());
    }

    #[test]
    fn mandatory_without_alerts_fails_validation() {
        let err = resolve(json!({
            "url": "https://example.com",
            "availableVersion": "2.0",
            "type": "mandatory"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("at least one update alert"), "got: {err}");
    }

    #[test]
    fn recommended_with_empty_alerts_fails_validation() {
        let err = resolve(json!({
            "url": "https://example.com",
            "availableVersion": "2.0",
            "type": "recommended",
            "localizedStrings": []
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn mandatory_without_update_action_fails_validation() {
        let err = resolve(json!({
            "url": "https://example.com",
            "availableVersion": "2.0",
            "type": "mandatory",
            "localizedStrings": [update_alert("de", json!([{"title": "OK"}]))]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("update action"), "got: {err}");
    }

    #[test]
    fn validation_uses_the_alert_selected_for_the_locale() {
        // The English alert has an update action, but the German one is selected.
        let err = resolve(json!({
            "url": "https://example.com",
            "availableVersion": "2.0",
            "type": "recommended",
            "localizedStrings": [
                update_alert("en", json!([{"title": "Update", "isUpdateAction": true}])),
                update_alert("de", json!([{"title": "Nein"}]))
            ]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    #[traced_test]
    fn malformed_alerts_are_dropped_individually() {
        let context = resolve(json!({
            "url": "https://example.com",
            "availableVersion": "2.0",
            "type": "recommended",
            "frequency": "once",
            "ignoredOSVersions": ["12"],
            "localizedStrings": [
                {"languageCode": "de", "title": "missing text and options"},
                null,
                update_alert("de", json!([{"title": "Nein"}, {"title": "Ja", "isUpdateAction": true}]))
            ]
        }))
        .unwrap();

        assert_eq!(context.update_type, UpdateType::Recommended);
        assert_eq!(context.alert_frequency, AlertFrequency::Once);
        assert_eq!(context.localized_alerts.as_ref().unwrap().len(), 1);
        assert_eq!(context.mandatory_versioning.ignored_versions, vec!["12"]);
        assert!(logs_contain("dropped malformed localized update alerts"));
    }

    #[test]
    fn ignore_tolerates_alerts_without_update_action() {
        let context = resolve(json!({
            "url": "https://example.com",
            "availableVersion": "2.0",
            "type": "ignore",
            "localizedStrings": [update_alert("de", json!([]))]
        }))
        .unwrap();
        assert_eq!(context.localized_alerts.unwrap().len(), 1);
    }

    #[test]
    fn declared_discarded_type_is_rejected() {
        let err = resolve(json!({
            "url": "https://example.com",
            "availableVersion": "2.0",
            "type": "discarded"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn localized_alert_uses_locale_priority() {
        let context = resolve(json!({
            "url": "https://example.com",
            "availableVersion": "2.0",
            "type": "recommended",
            "localizedStrings": [
                update_alert("en", json!([{"title": "Update", "isUpdateAction": true}])),
                update_alert("de", json!([{"title": "Aktualisieren", "isUpdateAction": true}]))
            ]
        }))
        .unwrap();

        assert_eq!(context.locale, Locale::parse("de-DE").unwrap());
        assert_eq!(context.localized_alert().unwrap().language_code.as_deref(), Some("de"));
    }

    #[test]
    fn localized_alert_is_the_one_validated() {
        let raw: RawUpdateContext = serde_json::from_value(json!({
            "url": "https://example.com",
            "availableVersion": "3.0",
            "type": "mandatory",
            "localizedStrings": [
                update_alert("en", json!([{"title": "Update", "isUpdateAction": true}])),
                update_alert("de", json!([{"title": "Später"}]))
            ]
        }))
        .unwrap();

        let context = raw
            .resolve(&ResolveContext::new(Locale::parse("en-US").unwrap(), "14.0"))
            .unwrap();
        let alert = context.localized_alert().unwrap();
        assert_eq!(alert.language_code.as_deref(), Some("en"));
        assert!(alert.options.update_action_option().is_some());
    }
}
