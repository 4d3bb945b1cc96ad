// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted model types.

use serde::{Deserialize, Serialize};

/// Per-installation context persisted alongside the cached payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationContext {
    /// The last recommended update version (frequency `once`) the user discarded.
    #[serde(default)]
    pub last_discarded_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_camel_case_key() {
        let context = ConfigurationContext {
            last_discarded_version: Some("4.5.6".into()),
        };
        let json = serde_json::to_string(&context).unwrap();
        assert_eq!(json, r#"{"lastDiscardedVersion":"4.5.6"}"#);
        assert_eq!(serde_json::from_str::<ConfigurationContext>("{}").unwrap(), ConfigurationContext::default());
    }
}
