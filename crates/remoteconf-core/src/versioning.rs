// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-version exemption matching for mandatory updates.
//!
//! Candidates are dotted prefixes compared component by component, so `12.2`
//! never matches `12.1.3` and `12.1.3.0` never matches `12.1.3`.

/// Returns `true` if any candidate in `ignored_versions` is a component-wise
/// prefix of `system_version`.
pub fn can_be_ignored<S: AsRef<str>>(system_version: &str, ignored_versions: &[S]) -> bool {
    let system: Vec<&str> = system_version.split('.').collect();
    ignored_versions
        .iter()
        .any(|candidate| is_component_prefix(candidate.as_ref(), &system))
}

fn is_component_prefix(candidate: &str, system: &[&str]) -> bool {
    let components: Vec<&str> = candidate.split('.').collect();
    components.len() <= system.len()
        && components
            .iter()
            .zip(system)
            .all(|(candidate, actual)| candidate == actual)
}
