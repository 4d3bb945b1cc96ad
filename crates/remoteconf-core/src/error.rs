// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for remote configuration resolution.

use strum::{Display, EnumString};
use thiserror::Error;

/// Boxed error source carried by struct variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across the remoteconf workspace.
#[derive(Debug, Error)]
pub enum RemoteConfigError {
    /// Transport or fetch failure, including the terminal "no fallback available" composite.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<BoxError>,
    },

    /// The payload was rejected by the deserializer (malformed bytes, schema mismatch).
    #[error("deserializer error: {message}")]
    Deserializer {
        message: String,
        source: Option<BoxError>,
    },

    /// The payload is well-formed but violates the update-context invariants.
    #[error("validation error: {0}")]
    Validation(String),

    /// Persistence collaborator failure (database, file system, context encoding).
    #[error("storage error: {source}")]
    Storage { source: BoxError },

    /// Invalid manager settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`RemoteConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Provider,
    Deserializer,
    Validation,
    Storage,
    Config,
    Internal,
}

impl RemoteConfigError {
    /// Builds a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Builds a deserializer error wrapping the decoder's own error.
    pub fn deserializer(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Deserializer {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds a storage error from any error source.
    pub fn storage(source: impl Into<BoxError>) -> Self {
        Self::Storage {
            source: source.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Provider { .. } => ErrorKind::Provider,
            Self::Deserializer { .. } => ErrorKind::Deserializer,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns the bare message of a provider error, or the rendered error otherwise.
    ///
    /// Used when composing the terminal fallback error so the original fetch
    /// message is not double-prefixed.
    pub fn provider_message(&self) -> String {
        match self {
            Self::Provider { message, .. } => message.clone(),
            other => format!("Error requesting Configuration: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn every_variant_maps_to_its_kind() {
        let cases = [
            (RemoteConfigError::provider("offline"), ErrorKind::Provider),
            (
                RemoteConfigError::deserializer("bad json", std::io::Error::other("eof")),
                ErrorKind::Deserializer,
            ),
            (
                RemoteConfigError::Validation("no alert".into()),
                ErrorKind::Validation,
            ),
            (
                RemoteConfigError::storage(std::io::Error::other("disk")),
                ErrorKind::Storage,
            ),
            (RemoteConfigError::Config("url".into()), ErrorKind::Config),
            (RemoteConfigError::Internal("bug".into()), ErrorKind::Internal),
        ];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "wrong kind for {error}");
        }
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in [ErrorKind::Provider, ErrorKind::Deserializer, ErrorKind::Validation] {
            let parsed = ErrorKind::from_str(&kind.to_string()).expect("should parse back");
            assert_eq!(parsed, kind);
        }
        assert_eq!(ErrorKind::Deserializer.to_string(), "deserializer");
    }

    #[test]
    fn provider_message_is_not_prefixed_for_provider_errors() {
        assert_eq!(RemoteConfigError::provider("timed out").provider_message(), "timed out");

        let other = RemoteConfigError::Internal("boom".into()).provider_message();
        assert_eq!(other, "Error requesting Configuration: internal error: boom");
    }
}
