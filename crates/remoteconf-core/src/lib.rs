// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for remoteconf.
//!
//! This crate provides the configuration model, the collaborator traits the
//! manager is built on, and the pure resolution rules: localized alert
//! selection, mandatory-version exemption matching and update-context
//! validation.

pub mod error;
pub mod locale;
pub mod traits;
pub mod types;
pub mod update_context;
pub mod versioning;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ErrorKind, RemoteConfigError};
pub use locale::{Locale, select_alert};
pub use types::{
    AlertFrequency, MandatoryVersioning, Origin, UpdateAlert, UpdateOption, UpdateOptions,
    UpdateType,
};
pub use update_context::{RawUpdateContext, ResolveContext, UpdateContext};
pub use versioning::can_be_ignored;

pub use traits::{BundleSource, Configuration, Deserializer, Provider, RecordStore};
