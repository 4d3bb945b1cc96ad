// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration request orchestration.
//!
//! A request fetches the configuration through the provider. When the fetch
//! fails the manager tries the cached payload of the last live fetch, then
//! the bundled configuration file. Whatever bytes are found are decoded once;
//! decode and validation failures are final and never fall through to the
//! next source.
//!
//! After decoding, a `recommended` update with frequency `once` whose version
//! matches the persisted discard record resolves to [`UpdateType::Discarded`].
//! Any other outcome clears the discard record.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use remoteconf_config::RemoteConfSettings;
use remoteconf_core::traits::bundle::normalize_bundle_name;
use remoteconf_core::{
    BundleSource, Configuration, Deserializer, Origin, Provider, RecordStore, RemoteConfigError,
    UpdateContext, UpdateType,
};
use remoteconf_storage::{ConfigurationCache, open_record_store};

use crate::bundle::DirectoryBundle;

/// Message of the error returned by a request superseded by a newer one.
pub const SUPERSEDED_MESSAGE: &str = "configuration request cancelled: superseded by a newer request";

const FALLBACK_UNAVAILABLE: &str =
    "Configuration cache and bundled Configuration disabled and/or unavailable.";

/// The outcome of one configuration request.
#[derive(Debug, Clone)]
pub struct ResolvedState<M> {
    /// The decoded configuration.
    pub configuration: M,

    /// The update type after applying the discard record.
    pub contextual_update_type: UpdateType,

    /// The source the configuration bytes came from.
    pub origin: Origin,
}

impl<M: Configuration> ResolvedState<M> {
    pub fn update_context(&self) -> &UpdateContext {
        self.configuration.app_update()
    }
}

/// Requests and resolves the remote configuration for one installation.
pub struct Manager {
    url: String,
    ignore_cache: bool,
    bundle_filename: Option<String>,
    bundle: Option<Arc<dyn BundleSource>>,
    cache: ConfigurationCache,
    // Token of the most recently started request.
    in_flight: Mutex<Option<CancellationToken>>,
}

impl Manager {
    /// Creates a manager fetching from `url` and caching into `store`.
    ///
    /// Caching is enabled and no bundle is configured.
    pub fn new(url: impl Into<String>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            url: url.into(),
            ignore_cache: false,
            bundle_filename: None,
            bundle: None,
            cache: ConfigurationCache::new(store),
            in_flight: Mutex::new(None),
        }
    }

    /// Builds a manager from loaded settings, opening the configured record
    /// store and bundle directory.
    pub fn from_settings(settings: &RemoteConfSettings) -> Result<Self, RemoteConfigError> {
        let store = open_record_store(&settings.cache.database_path)?;
        let mut manager = Self::new(settings.source.url.clone(), store)
            .with_ignore_cache(settings.cache.ignore_cache)
            .with_bundle_source(Arc::new(DirectoryBundle::new(&settings.bundle.directory)));
        if let Some(filename) = &settings.bundle.filename {
            manager = manager.with_bundle_filename(filename.clone());
        }
        Ok(manager)
    }

    /// When `true`, a failed fetch skips the cached payload.
    pub fn with_ignore_cache(mut self, ignore_cache: bool) -> Self {
        self.ignore_cache = ignore_cache;
        self
    }

    /// Name of the bundled configuration file, with or without `.json`.
    pub fn with_bundle_filename(mut self, filename: impl Into<String>) -> Self {
        self.bundle_filename = Some(filename.into());
        self
    }

    /// Container the bundled configuration file is loaded from.
    pub fn with_bundle_source(mut self, bundle: Arc<dyn BundleSource>) -> Self {
        self.bundle = Some(bundle);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ignore_cache(&self) -> bool {
        self.ignore_cache
    }

    pub fn bundle_filename(&self) -> Option<&str> {
        self.bundle_filename.as_deref()
    }

    /// Requests the configuration and resolves its effective update type.
    ///
    /// Starting a request cancels the one already in flight on this manager;
    /// the cancelled request completes with a provider error carrying
    /// [`SUPERSEDED_MESSAGE`] and does not consult the fallbacks.
    pub async fn request<D: Deserializer>(
        &self,
        provider: &dyn Provider,
        deserializer: &D,
    ) -> Result<ResolvedState<D::Model>, RemoteConfigError> {
        let token = CancellationToken::new();
        if let Some(previous) = self.in_flight.lock().replace(token.clone()) {
            previous.cancel();
        }

        debug!(url = %self.url, "requesting configuration");
        let fetched = tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!(url = %self.url, "configuration request superseded");
                return Err(RemoteConfigError::provider(SUPERSEDED_MESSAGE));
            }
            result = provider.fetch(&self.url, token.clone()) => result,
        };

        match fetched {
            Ok(data) => self.deserialize_and_resolve(deserializer, &data, Origin::Provider),
            Err(error) => {
                warn!(url = %self.url, error = %error, "configuration fetch failed");
                self.resolve_fallback(deserializer, error)
            }
        }
    }

    /// Decodes the cached payload of the last live fetch.
    ///
    /// Returns `None` when the cache is empty or the payload no longer decodes.
    pub fn load_from_cache<D: Deserializer>(&self, deserializer: &D) -> Option<D::Model> {
        let data = self.cache.last_loaded_configuration()?;
        match deserializer.deserialize(&data) {
            Ok(configuration) => Some(configuration),
            Err(e) => {
                debug!(error = %e, "cached configuration no longer decodes");
                None
            }
        }
    }

    /// Records that the user discarded the recommended update in `context`.
    pub fn discard_recommended_update(&self, context: &UpdateContext) -> Result<(), RemoteConfigError> {
        info!(version = %context.available_version, "recommended update discarded");
        self.cache
            .set_last_discarded_version(Some(&context.available_version))
    }

    /// Erases the cached payload and the discard record.
    pub fn clear_cache(&self) -> Result<(), RemoteConfigError> {
        self.cache.clear()
    }

    fn resolve_fallback<D: Deserializer>(
        &self,
        deserializer: &D,
        error: RemoteConfigError,
    ) -> Result<ResolvedState<D::Model>, RemoteConfigError> {
        if !self.ignore_cache
            && let Some(data) = self.cache.last_loaded_configuration()
        {
            debug!(bytes = data.len(), "falling back to cached configuration");
            return self.deserialize_and_resolve(deserializer, &data, Origin::Cache);
        }

        if let Some(data) = self.load_bundled_configuration() {
            debug!(bytes = data.len(), "falling back to bundled configuration");
            return self.deserialize_and_resolve(deserializer, &data, Origin::Bundle);
        }

        Err(RemoteConfigError::Provider {
            message: format!("{}; {FALLBACK_UNAVAILABLE}", error.provider_message()),
            source: Some(Box::new(error)),
        })
    }

    fn load_bundled_configuration(&self) -> Option<Vec<u8>> {
        let filename = self.bundle_filename.as_deref()?;
        let bundle = self.bundle.as_ref()?;
        bundle.load(normalize_bundle_name(filename))
    }

    fn deserialize_and_resolve<D: Deserializer>(
        &self,
        deserializer: &D,
        data: &[u8],
        origin: Origin,
    ) -> Result<ResolvedState<D::Model>, RemoteConfigError> {
        let configuration = deserializer.deserialize(data)?;

        if origin == Origin::Provider
            && let Err(e) = self.cache.set_last_loaded_configuration(data)
        {
            warn!(error = %e, "failed to cache configuration payload");
        }

        let update = configuration.app_update();
        let contextual_update_type = if self.cache.resolve_discard(update) {
            UpdateType::Discarded
        } else {
            update.update_type
        };

        info!(
            origin = %origin,
            version = %update.available_version,
            update_type = %contextual_update_type,
            "configuration resolved"
        );

        Ok(ResolvedState {
            configuration,
            contextual_update_type,
            origin,
        })
    }
}
