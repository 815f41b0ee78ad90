//! Storage and theme store setup for CLI commands

use crate::config::{RecallConfig, StorageConfig};
use recall_storage::{FileStore, KeyValueStore, MemoryStore, Namespaced};
use recall_theme::ThemeStore;
use std::sync::Arc;

/// Medium backing the CLI's stores
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    File,
    /// The configured file could not be opened; nothing outlives the run
    Memory,
}

/// Open the configured file store, falling back to memory if it is unavailable
pub async fn open_storage(config: &StorageConfig) -> (Arc<dyn KeyValueStore>, Backend) {
    match FileStore::open(config.path.clone()).await {
        Ok(file) => (
            Arc::new(Namespaced::new(file, config.namespace.clone())),
            Backend::File,
        ),
        Err(err) => {
            tracing::warn!(
                path = %config.path.display(),
                error = %err,
                "storage unavailable; changes will not outlive this run"
            );
            (
                Arc::new(Namespaced::new(MemoryStore::new(), config.namespace.clone())),
                Backend::Memory,
            )
        }
    }
}

/// Theme store over the configured storage, already hydrated
pub async fn open_theme_store(config: &RecallConfig) -> Arc<ThemeStore> {
    let (storage, backend) = open_storage(&config.storage).await;
    tracing::debug!(?backend, "theme storage opened");
    let store = ThemeStore::spawn(storage, config.theme.store_config());
    store.hydrate().await;
    store
}
