// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted configuration cache.
//!
//! Holds the last successfully fetched payload and the [`ConfigurationContext`]
//! (last discarded update version) in a [`RecordStore`].
//!
//! Every access is serialized through one reader-writer lock: readers may
//! overlap each other but never a writer, and the read-modify-write of the
//! context happens under a single exclusive guard.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use remoteconf_core::{AlertFrequency, RecordStore, RemoteConfigError, UpdateContext, UpdateType};

use crate::models::ConfigurationContext;

/// Storage identifiers under which the cache persists its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageIdentifier {
    /// The JSON-encoded [`ConfigurationContext`].
    ConfigurationContext,
    /// The raw bytes of the last live-fetched configuration.
    LastLoadedConfiguration,
}

impl StorageIdentifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConfigurationContext => "remoteconf.storage.configurationcontext",
            Self::LastLoadedConfiguration => "remoteconf.cache",
        }
    }
}

/// Cache of the last loaded configuration and the discard record.
pub struct ConfigurationCache {
    store: Arc<dyn RecordStore>,
    lock: RwLock<()>,
}

impl ConfigurationCache {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            lock: RwLock::new(()),
        }
    }

    /// The raw bytes of the last successfully fetched configuration.
    ///
    /// Storage failures are logged and reported as an empty cache.
    pub fn last_loaded_configuration(&self) -> Option<Vec<u8>> {
        let _guard = self.lock.read();
        match self
            .store
            .first(StorageIdentifier::LastLoadedConfiguration.as_str())
        {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "failed to read cached configuration");
                None
            }
        }
    }

    /// Overwrites the cached configuration payload.
    pub fn set_last_loaded_configuration(&self, data: &[u8]) -> Result<(), RemoteConfigError> {
        let _guard = self.lock.write();
        self.store.replace_all(
            StorageIdentifier::LastLoadedConfiguration.as_str(),
            vec![data.to_vec()],
        )?;
        debug!(bytes = data.len(), "cached configuration payload");
        Ok(())
    }

    /// The last recommended update version the user discarded.
    pub fn last_discarded_version(&self) -> Option<String> {
        let _guard = self.lock.read();
        self.load_context()?.last_discarded_version
    }

    /// Records (or clears, with `None`) the discarded update version.
    ///
    /// Skips the write when the stored value already matches.
    pub fn set_last_discarded_version(&self, version: Option<&str>) -> Result<(), RemoteConfigError> {
        let _guard = self.lock.write();
        let mut context = self.load_context().unwrap_or_default();
        if context.last_discarded_version.as_deref() == version {
            return Ok(());
        }
        context.last_discarded_version = version.map(str::to_string);
        self.save_context(&context)?;
        debug!(version = ?version, "updated discarded update version");
        Ok(())
    }

    /// Checks `update` against the discard record and returns whether it was
    /// discarded. A record that does not match is reset.
    ///
    /// Compare and reset happen under one exclusive guard, so a discard
    /// recorded concurrently is ordered entirely before or after them.
    /// A failed reset is logged; the comparison result stands.
    pub fn resolve_discard(&self, update: &UpdateContext) -> bool {
        let _guard = self.lock.write();
        let Some(mut context) = self.load_context() else {
            return false;
        };

        let discardable = update.update_type == UpdateType::Recommended
            && update.alert_frequency == AlertFrequency::Once;
        if discardable
            && context.last_discarded_version.as_deref() == Some(update.available_version.as_str())
        {
            return true;
        }

        if context.last_discarded_version.take().is_some() {
            match self.save_context(&context) {
                Ok(()) => debug!("reset discarded update version"),
                Err(e) => warn!(error = %e, "failed to reset discarded update version"),
            }
        }
        false
    }

    /// Erases the discard record, then the cached payload.
    ///
    /// If erasing the payload fails, the discard record is already gone.
    pub fn clear(&self) -> Result<(), RemoteConfigError> {
        let _guard = self.lock.write();
        self.store
            .replace_all(StorageIdentifier::ConfigurationContext.as_str(), Vec::new())?;
        self.store
            .replace_all(StorageIdentifier::LastLoadedConfiguration.as_str(), Vec::new())?;
        debug!("configuration cache cleared");
        Ok(())
    }

    // Callers must hold the lock.
    fn load_context(&self) -> Option<ConfigurationContext> {
        let record = match self
            .store
            .first(StorageIdentifier::ConfigurationContext.as_str())
        {
            Ok(record) => record?,
            Err(e) => {
                warn!(error = %e, "failed to read configuration context");
                return None;
            }
        };
        match serde_json::from_slice(&record) {
            Ok(context) => Some(context),
            Err(e) => {
                warn!(error = %e, "discarding undecodable configuration context");
                None
            }
        }
    }

    // Callers must hold the write lock.
    fn save_context(&self, context: &ConfigurationContext) -> Result<(), RemoteConfigError> {
        let encoded = serde_json::to_vec(context).map_err(RemoteConfigError::storage)?;
        self.store.replace_all(
            StorageIdentifier::ConfigurationContext.as_str(),
            vec![encoded],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use parking_lot::Mutex;
    use remoteconf_core::{Locale, MandatoryVersioning};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{OnceLock, Weak};
    use std::thread::JoinHandle;
    use tracing_test::traced_test;

    fn cache() -> (Arc<MemoryStore>, ConfigurationCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = ConfigurationCache::new(store.clone());
        (store, cache)
    }

    fn update(version: &str, update_type: UpdateType, alert_frequency: AlertFrequency) -> UpdateContext {
        UpdateContext {
            update_url: "https://apps.example.com/app".into(),
            available_version: version.into(),
            alert_frequency,
            update_type,
            mandatory_versioning: MandatoryVersioning::default(),
            localized_alerts: None,
            locale: Locale::default(),
        }
    }

    /// Records a discard through the cache from another thread the first time
    /// the context is read.
    #[derive(Default)]
    struct DiscardDuringRead {
        inner: MemoryStore,
        cache: OnceLock<Weak<ConfigurationCache>>,
        armed: AtomicBool,
        discard: Mutex<Option<JoinHandle<()>>>,
    }

    impl RecordStore for DiscardDuringRead {
        fn first(&self, key: &str) -> Result<Option<Vec<u8>>, RemoteConfigError> {
            if key == StorageIdentifier::ConfigurationContext.as_str()
                && self.armed.swap(false, Ordering::SeqCst)
                && let Some(cache) = self.cache.get().and_then(Weak::upgrade)
            {
                *self.discard.lock() = Some(std::thread::spawn(move || {
                    cache.set_last_discarded_version(Some("2.0")).unwrap();
                }));
            }
            self.inner.first(key)
        }

        fn replace_all(&self, key: &str, records: Vec<Vec<u8>>) -> Result<(), RemoteConfigError> {
            self.inner.replace_all(key, records)
        }
    }

    /// Fails every write to one key.
    struct FailWritesTo {
        inner: MemoryStore,
        key: &'static str,
    }

    impl RecordStore for FailWritesTo {
        fn first(&self, key: &str) -> Result<Option<Vec<u8>>, RemoteConfigError> {
            self.inner.first(key)
        }

        fn replace_all(&self, key: &str, records: Vec<Vec<u8>>) -> Result<(), RemoteConfigError> {
            if key == self.key {
                return Err(RemoteConfigError::storage(format!("write to {key} rejected")));
            }
            self.inner.replace_all(key, records)
        }
    }

    #[test]
    fn last_loaded_configuration_round_trips() {
        let (_, cache) = cache();
        assert!(cache.last_loaded_configuration().is_none());

        cache
            .set_last_loaded_configuration(br#"{"key":"value"}"#)
            .unwrap();
        let loaded = cache.last_loaded_configuration().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&loaded).unwrap();
        assert_eq!(json["key"], "value");
    }

    #[test]
    fn discarded_version_is_persisted_in_the_context() {
        let (store, cache) = cache();
        cache.set_last_discarded_version(Some("4.5.6")).unwrap();
        assert_eq!(cache.last_discarded_version().as_deref(), Some("4.5.6"));

        let raw = store
            .first(StorageIdentifier::ConfigurationContext.as_str())
            .unwrap()
            .unwrap();
        assert_eq!(raw, br#"{"lastDiscardedVersion":"4.5.6"}"#.to_vec());

        cache.set_last_discarded_version(None).unwrap();
        assert!(cache.last_discarded_version().is_none());
    }

    #[test]
    fn clear_erases_payload_and_context() {
        let (store, cache) = cache();
        cache.set_last_loaded_configuration(b"{}").unwrap();
        cache.set_last_discarded_version(Some("1.0")).unwrap();

        cache.clear().unwrap();
        assert!(cache.last_loaded_configuration().is_none());
        assert!(cache.last_discarded_version().is_none());
        assert!(!store.contains(StorageIdentifier::ConfigurationContext.as_str()));
    }

    #[test]
    fn clear_removes_discard_record_even_if_payload_erase_fails() {
        let store = Arc::new(FailWritesTo {
            inner: MemoryStore::new(),
            key: StorageIdentifier::LastLoadedConfiguration.as_str(),
        });
        let cache = ConfigurationCache::new(store.clone());
        cache.set_last_discarded_version(Some("1.0")).unwrap();

        assert!(cache.clear().is_err());
        assert!(cache.last_discarded_version().is_none());
    }

    #[test]
    fn resolve_discard_matches_only_once_recommended_updates() {
        let (_, cache) = cache();
        cache.set_last_discarded_version(Some("2.0")).unwrap();

        assert!(cache.resolve_discard(&update("2.0", UpdateType::Recommended, AlertFrequency::Once)));
        assert_eq!(cache.last_discarded_version().as_deref(), Some("2.0"));

        assert!(!cache.resolve_discard(&update("2.0", UpdateType::Recommended, AlertFrequency::Always)));
        assert!(cache.last_discarded_version().is_none());
    }

    #[test]
    fn resolve_discard_resets_a_stale_record() {
        let (_, cache) = cache();
        assert!(!cache.resolve_discard(&update("2.0", UpdateType::Recommended, AlertFrequency::Once)));

        cache.set_last_discarded_version(Some("1.0")).unwrap();
        assert!(!cache.resolve_discard(&update("2.0", UpdateType::Recommended, AlertFrequency::Once)));
        assert!(cache.last_discarded_version().is_none());
    }

    #[test]
    fn discard_recorded_during_resolution_survives() {
        let store = Arc::new(DiscardDuringRead::default());
        store
            .inner
            .replace_all(
                StorageIdentifier::ConfigurationContext.as_str(),
                vec![br#"{"lastDiscardedVersion":"1.0"}"#.to_vec()],
            )
            .unwrap();
        let cache = Arc::new(ConfigurationCache::new(store.clone()));
        store.cache.set(Arc::downgrade(&cache)).unwrap();
        store.armed.store(true, Ordering::SeqCst);

        let discarded =
            cache.resolve_discard(&update("2.0", UpdateType::Recommended, AlertFrequency::Once));
        assert!(!discarded);

        let discard = store.discard.lock().take().unwrap();
        discard.join().unwrap();
        assert_eq!(cache.last_discarded_version().as_deref(), Some("2.0"));
    }

    #[test]
    #[traced_test]
    fn undecodable_context_reads_as_absent() {
        let (store, cache) = cache();
        store
            .replace_all(
                StorageIdentifier::ConfigurationContext.as_str(),
                vec![b"not json".to_vec()],
            )
            .unwrap();

        assert!(cache.last_discarded_version().is_none());
        assert!(logs_contain("discarding undecodable configuration context"));

        cache.set_last_discarded_version(Some("2.0")).unwrap();
        assert_eq!(cache.last_discarded_version().as_deref(), Some("2.0"));
    }

    #[test]
    fn concurrent_readers_and_writers_never_tear() {
        let (_, cache) = cache();
        let cache = Arc::new(cache);

        let written: Vec<String> = (0..4)
            .flat_map(|i| (0..50).map(move |j| format!("{i}.{j}")))
            .collect();

        std::thread::scope(|scope| {
            for i in 0..4 {
                let cache = cache.clone();
                scope.spawn(move || {
                    for j in 0..50 {
                        let version = format!("{i}.{j}");
                        cache.set_last_discarded_version(Some(&version)).unwrap();
                        cache.set_last_loaded_configuration(version.as_bytes()).unwrap();
                    }
                });
            }
            for _ in 0..4 {
                let cache = cache.clone();
                let written = &written;
                scope.spawn(move || {
                    for _ in 0..50 {
                        if let Some(version) = cache.last_discarded_version() {
                            assert!(written.contains(&version), "torn read: {version}");
                        }
                        if let Some(payload) = cache.last_loaded_configuration() {
                            let payload = String::from_utf8(payload).unwrap();
                            assert!(written.contains(&payload), "torn read: {payload}");
                        }
                    }
                });
            }
        });
    }
}
