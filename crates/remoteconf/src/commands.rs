// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations for the `remoteconf` binary.

use std::sync::Arc;

use serde::Serialize;

use remoteconf::{
    DefaultConfiguration, JsonDeserializer, Manager, ResolvedState, UpdateAction,
    UpdateDecisionHandler,
};
use remoteconf_config::RemoteConfSettings;
use remoteconf_core::{Origin, RemoteConfigError, UpdateType};
use remoteconf_http::HttpProvider;

/// Structured output of `remoteconf fetch --json`.
#[derive(Debug, Serialize)]
struct FetchReport<'a> {
    origin: Origin,
    update_type: UpdateType,
    available_version: &'a str,
    decision: &'a UpdateAction,
    url_config: &'a serde_json::Value,
}

struct Session {
    manager: Arc<Manager>,
    deserializer: JsonDeserializer,
}

impl Session {
    fn open(settings: &RemoteConfSettings) -> Result<Self, RemoteConfigError> {
        Ok(Self {
            manager: Arc::new(Manager::from_settings(settings)?),
            deserializer: JsonDeserializer::new(settings.client.resolve_context()),
        })
    }

    async fn request(
        &self,
        settings: &RemoteConfSettings,
    ) -> Result<ResolvedState<DefaultConfiguration>, RemoteConfigError> {
        let provider = HttpProvider::from_settings(&settings.source)?;
        self.manager.request(&provider, &self.deserializer).await
    }

    fn handler(&self) -> UpdateDecisionHandler {
        UpdateDecisionHandler::new(self.manager.clone())
    }
}

/// Run `remoteconf fetch`.
pub async fn run_fetch(settings: &RemoteConfSettings, json: bool) -> Result<(), RemoteConfigError> {
    let session = Session::open(settings)?;
    let state = session.request(settings).await?;
    let decision = session.handler().decide_for(&state);

    if json {
        let report = FetchReport {
            origin: state.origin,
            update_type: state.contextual_update_type,
            available_version: &state.update_context().available_version,
            decision: &decision,
            url_config: &state.configuration.url_config,
        };
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| RemoteConfigError::Internal(format!("failed to render report: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    println!("origin:            {}", state.origin);
    println!("available version: {}", state.update_context().available_version);
    println!("update type:       {}", state.contextual_update_type);
    println!("decision:          {}", describe(&decision));
    print_url_config(&state.configuration.url_config)?;
    Ok(())
}

/// Run `remoteconf cached`.
pub fn run_cached(settings: &RemoteConfSettings) -> Result<(), RemoteConfigError> {
    let session = Session::open(settings)?;
    match session.manager.load_from_cache(&session.deserializer) {
        Some(configuration) => {
            println!("available version: {}", configuration.app_update.available_version);
            println!("update type:       {}", configuration.app_update.update_type);
            print_url_config(&configuration.url_config)
        }
        None => {
            println!("no cached configuration");
            Ok(())
        }
    }
}

/// Run `remoteconf discard`.
pub async fn run_discard(settings: &RemoteConfSettings) -> Result<(), RemoteConfigError> {
    let session = Session::open(settings)?;
    let state = session.request(settings).await?;
    let context = state.update_context();

    if state.contextual_update_type != UpdateType::Recommended {
        println!(
            "nothing to discard: update type is {}",
            state.contextual_update_type
        );
        return Ok(());
    }

    session.manager.discard_recommended_update(context)?;
    println!("discarded recommended update {}", context.available_version);
    Ok(())
}

/// Run `remoteconf clear-cache`.
pub fn run_clear_cache(settings: &RemoteConfSettings) -> Result<(), RemoteConfigError> {
    Session::open(settings)?.manager.clear_cache()?;
    println!("configuration cache cleared");
    Ok(())
}

fn describe(action: &UpdateAction) -> String {
    let (kind, prompt) = match action {
        UpdateAction::None => return "none".to_string(),
        UpdateAction::ShowRecommendedAlert(prompt) => ("recommended alert", prompt),
        UpdateAction::ShowMandatoryAlert(prompt) => ("mandatory alert", prompt),
    };
    let options: Vec<String> = prompt
        .options
        .iter()
        .map(|o| {
            if o.is_update_action {
                format!("{}*", o.title)
            } else {
                o.title.clone()
            }
        })
        .collect();
    format!("show {kind} \"{}\" [{}]", prompt.title, options.join(", "))
}

fn print_url_config(url_config: &serde_json::Value) -> Result<(), RemoteConfigError> {
    let rendered = serde_json::to_string_pretty(url_config)
        .map_err(|e| RemoteConfigError::Internal(format!("failed to render urlConfig: {e}")))?;
    println!("urlConfig:\n{rendered}");
    Ok(())
}
