//! Recall Storage
//!
//! The durable key-value adapter used by Recall's UI preference stores.
//!
//! Every backend implements [`KeyValueStore`]: three asynchronous operations
//! over string keys and JSON values.
//!
//! - `read` returns `None` for a key that was never written (or was deleted);
//!   absence is not an error
//! - `write` overwrites and is safe to retry
//! - `delete` of an absent key succeeds
//!
//! Backends fail with [`StorageError::Unavailable`] when the medium cannot be
//! opened or written. Callers are expected to treat that as non-fatal and
//! carry on with in-memory state.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local map, used in tests and as a fallback
//! - [`FileStore`]: JSON document on disk, replaced atomically on write
//! - [`Namespaced`]: prefixes keys so subsystems sharing a medium never collide
//!
//! ```rust,ignore
//! use recall_storage::{FileStore, KeyValueStore, Namespaced};
//!
//! let store = Namespaced::new(FileStore::open("data/recall.json").await?, "recall");
//! store.write("sr-theme", serde_json::json!("light")).await?;
//! assert_eq!(store.read("sr-theme").await?, Some(serde_json::json!("light")));
//! ```

pub mod error;
pub mod file;
pub mod memory;
pub mod namespaced;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use namespaced::Namespaced;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Asynchronous string-keyed store of JSON values
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if there is none
    async fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn write(&self, key: &str, value: Value) -> Result<()>;

    /// Remove any value stored under `key`
    async fn delete(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        (**self).write(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }
}
