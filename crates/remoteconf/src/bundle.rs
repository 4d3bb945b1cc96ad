// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bundled configuration files read from a directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use remoteconf_core::BundleSource;
use remoteconf_core::traits::bundle::{BUNDLE_EXTENSION, normalize_bundle_name};

/// Serves `<root>/<name>.json` for a logical bundle name.
#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    root: PathBuf,
}

impl DirectoryBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `name`; a `.json` suffix on `name` is optional.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{BUNDLE_EXTENSION}", normalize_bundle_name(name)))
    }
}

impl BundleSource for DirectoryBundle {
    fn load(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.path_for(name);
        match std::fs::read(&path) {
            Ok(data) => Some(data),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "bundled configuration unavailable");
                None
            }
        }
    }
}
