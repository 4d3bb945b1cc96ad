// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default configuration model for the reference JSON document.
//!
//! ```json
//! {
//!     "urlConfig": { "imprint": "https://www.example.com/imprint" },
//!     "appUpdate": {
//!         "availableVersion": "1.6.0",
//!         "url": "https://apps.example.com/app/id346997126",
//!         "type": "ignore"
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use remoteconf_core::{
    Configuration, Deserializer, RawUpdateContext, RemoteConfigError, ResolveContext, UpdateContext,
};

/// A configuration with an opaque `urlConfig` object and an `appUpdate` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultConfiguration {
    /// Application-defined URLs, passed through untouched. Always an object.
    pub url_config: Value,
    pub app_update: UpdateContext,
}

impl Configuration for DefaultConfiguration {
    fn app_update(&self) -> &UpdateContext {
        &self.app_update
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfiguration {
    url_config: Map<String, Value>,
    app_update: RawUpdateContext,
}

/// Decodes [`DefaultConfiguration`] documents with `serde_json`.
#[derive(Debug, Clone)]
pub struct JsonDeserializer {
    context: ResolveContext,
}

impl JsonDeserializer {
    pub fn new(context: ResolveContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ResolveContext {
        &self.context
    }
}

impl Default for JsonDeserializer {
    /// Uses the detected locale and platform version.
    fn default() -> Self {
        Self::new(ResolveContext::detect())
    }
}

impl Deserializer for JsonDeserializer {
    type Model = DefaultConfiguration;

    fn deserialize(&self, data: &[u8]) -> Result<DefaultConfiguration, RemoteConfigError> {
        let raw: RawConfiguration = serde_json::from_slice(data)
            .map_err(|e| RemoteConfigError::deserializer(format!("invalid configuration document: {e}"), e))?;

        Ok(DefaultConfiguration {
            url_config: Value::Object(raw.url_config),
            app_update: raw.app_update.resolve(&self.context)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remoteconf_core::{ErrorKind, Locale, UpdateType};
    use serde_json::json;

    fn deserializer() -> JsonDeserializer {
        JsonDeserializer::new(ResolveContext::new(Locale::parse("de-DE").unwrap(), "13.0"))
    }

    #[test]
    fn decodes_reference_document() {
        let data = json!({
            "urlConfig": { "imprint": "https://www.example.com/imprint" },
            "appUpdate": {
                "availableVersion": "1.6.0",
                "url": "https://apps.example.com/app",
                "type": "mandatory",
                "ignoredOSVersions": ["12"],
                "localizedStrings": [{
                    "languageCode": "de",
                    "title": "Aktualisierung",
                    "text": "Bitte aktualisieren.",
                    "options": [{ "title": "Aktualisieren", "isUpdateAction": true }]
                }]
            }
        })
        .to_string();

        let configuration = deserializer().deserialize(data.as_bytes()).unwrap();
        assert_eq!(configuration.url_config["imprint"], "https://www.example.com/imprint");
        assert_eq!(configuration.app_update.update_type, UpdateType::Mandatory);
        assert_eq!(configuration.app_update.mandatory_versioning.system_version, "13.0");
        assert!(!configuration.app_update.mandatory_versioning.can_be_ignored());
    }

    #[test]
    fn malformed_bytes_are_a_deserializer_error() {
        let err = deserializer().deserialize(b"{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Deserializer);
    }

    #[test]
    fn url_config_must_be_an_object() {
        let data = json!({
            "urlConfig": ["https://www.example.com"],
            "appUpdate": { "availableVersion": "1.0", "url": "https://apps.example.com/app" }
        })
        .to_string();
        let err = deserializer().deserialize(data.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Deserializer);
    }

    #[test]
    fn missing_app_update_is_a_deserializer_error() {
        let err = deserializer().deserialize(br#"{"urlConfig":{}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Deserializer);
        assert!(err.to_string().contains("appUpdate"), "got: {err}");
    }

    #[test]
    fn invariant_violations_are_validation_errors() {
        let data = json!({
            "urlConfig": {},
            "appUpdate": { "availableVersion": "1.0", "url": "https://apps.example.com/app", "type": "recommended" }
        })
        .to_string();
        let err = deserializer().deserialize(data.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn serializes_back_to_camel_case() {
        let data = json!({
            "urlConfig": {},
            "appUpdate": { "availableVersion": "1.0", "url": "https://apps.example.com/app" }
        })
        .to_string();
        let configuration = deserializer().deserialize(data.as_bytes()).unwrap();
        let value = serde_json::to_value(&configuration).unwrap();
        assert!(value.get("urlConfig").is_some());
        assert_eq!(value["appUpdate"]["availableVersion"], "1.0");
        assert_eq!(value["appUpdate"]["updateUrl"], "https://apps.example.com/app");
        assert_eq!(value["appUpdate"]["mandatoryVersioning"]["ignoredVersions"], json!([]));
        assert!(value["appUpdate"].get("available_version").is_none());
    }
}
