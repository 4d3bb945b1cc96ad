// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for configuration payloads in the reference JSON schema.

use serde_json::{Value, json};

/// An alert for `language` (and optionally `region`) with a "Later" option
/// and an update action.
pub fn update_alert(language: &str, region: Option<&str>) -> Value {
    let mut alert = json!({
        "languageCode": language,
        "title": format!("Update ({language})"),
        "text": "A new version is available.",
        "options": [
            { "title": "Later" },
            { "title": "Update", "isUpdateAction": true }
        ]
    });
    if let Some(region) = region {
        alert["regionCode"] = json!(region);
    }
    alert
}

/// A complete configuration document wrapping `app_update`.
pub fn configuration(app_update: Value) -> Vec<u8> {
    let document = json!({
        "urlConfig": {
            "api": "https://api.example.com",
            "imprint": "https://www.example.com/imprint"
        },
        "appUpdate": app_update
    });
    document.to_string().into_bytes()
}

/// A configuration announcing `version` with no update required.
pub fn ignore_update(version: &str) -> Vec<u8> {
    configuration(json!({
        "url": "https://apps.example.com/app",
        "availableVersion": version,
        "type": "ignore"
    }))
}

/// A recommended update for `version` with the given alert frequency.
pub fn recommended_update(version: &str, frequency: &str) -> Vec<u8> {
    configuration(json!({
        "url": "https://apps.example.com/app",
        "availableVersion": version,
        "type": "recommended",
        "frequency": frequency,
        "localizedStrings": [update_alert("en", None), update_alert("de", Some("DE"))]
    }))
}

/// A mandatory update for `version`, exempting `ignored_os_versions`.
pub fn mandatory_update(version: &str, ignored_os_versions: &[&str]) -> Vec<u8> {
    configuration(json!({
        "url": "https://apps.example.com/app",
        "availableVersion": version,
        "type": "mandatory",
        "ignoredOSVersions": ignored_os_versions,
        "localizedStrings": [update_alert("en", None)]
    }))
}

/// A mandatory update without any localized alerts, which fails validation.
pub fn invalid_mandatory_update(version: &str) -> Vec<u8> {
    configuration(json!({
        "url": "https://apps.example.com/app",
        "availableVersion": version,
        "type": "mandatory"
    }))
}
