// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decides which update alert, if any, a client presents.
//!
//! The handler does not render anything. [`UpdateDecisionHandler::decide`]
//! returns the alert contents and [`UpdateDecisionHandler::select_option`]
//! maps the option the user picked to an outcome, recording discards of
//! `once`-frequency recommended updates on the manager.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use remoteconf_core::{
    AlertFrequency, Configuration, MandatoryVersioning, RemoteConfigError, UpdateContext,
    UpdateOption, UpdateOptions, UpdateType,
};

use crate::manager::{Manager, ResolvedState};

/// Contents of an update alert to present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPrompt {
    pub title: String,
    pub text: String,
    pub options: Vec<UpdateOption>,
}

/// What the client should do about an available update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "alert", rename_all = "snake_case")]
pub enum UpdateAction {
    /// Nothing to present.
    None,
    /// Present an alert the user may dismiss.
    ShowRecommendedAlert(AlertPrompt),
    /// Present an alert offering only the update action.
    ShowMandatoryAlert(AlertPrompt),
}

/// Result of the user picking an alert option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Open the update URL.
    OpenUpdateUrl(String),
    /// Close the alert.
    Dismissed,
}

/// Alerts are chosen with the locale each [`UpdateContext`] was resolved with.
pub struct UpdateDecisionHandler {
    manager: Arc<Manager>,
}

impl UpdateDecisionHandler {
    pub fn new(manager: Arc<Manager>) -> Self {
        Self { manager }
    }

    /// Decides for a resolved request, using its contextual update type.
    pub fn decide_for<M: Configuration>(&self, state: &ResolvedState<M>) -> UpdateAction {
        let context = state.update_context();
        self.decide(
            state.contextual_update_type,
            &context.mandatory_versioning,
            context,
        )
    }

    pub fn decide(
        &self,
        update_type: UpdateType,
        mandatory_versioning: &MandatoryVersioning,
        context: &UpdateContext,
    ) -> UpdateAction {
        match update_type {
            UpdateType::Ignore | UpdateType::Discarded => UpdateAction::None,
            UpdateType::Recommended => {
                let Some(alert) = context.localized_alert() else {
                    return UpdateAction::None;
                };
                if alert.options.is_empty() {
                    return UpdateAction::None;
                }
                UpdateAction::ShowRecommendedAlert(AlertPrompt {
                    title: alert.title.clone(),
                    text: alert.text.clone(),
                    options: alert.options.clone(),
                })
            }
            UpdateType::Mandatory => {
                if mandatory_versioning.can_be_ignored() {
                    debug!(
                        system_version = %mandatory_versioning.system_version,
                        "mandatory update ignored for this platform version"
                    );
                    return UpdateAction::None;
                }
                let Some(alert) = context.localized_alert() else {
                    return UpdateAction::None;
                };
                let Some(update_action) = alert.options.update_action_option() else {
                    return UpdateAction::None;
                };
                UpdateAction::ShowMandatoryAlert(AlertPrompt {
                    title: alert.title.clone(),
                    text: alert.text.clone(),
                    options: vec![update_action.clone()],
                })
            }
        }
    }

    /// Handles the user picking `option` in the alert for `context`.
    pub fn select_option(
        &self,
        context: &UpdateContext,
        option: &UpdateOption,
    ) -> Result<SelectionOutcome, RemoteConfigError> {
        if option.is_update_action {
            return Ok(SelectionOutcome::OpenUpdateUrl(context.update_url.clone()));
        }
        if context.update_type == UpdateType::Recommended
            && context.alert_frequency == AlertFrequency::Once
        {
            self.manager.discard_recommended_update(context)?;
        }
        Ok(SelectionOutcome::Dismissed)
    }
}
