//! File-backed durable store
//!
//! All keys live in a single JSON object document. Each operation re-reads the
//! document so values written by other processes are picked up. Writes go to a
//! uniquely named temp file that is then renamed over the document, so a crash
//! never leaves a half-written document behind.
//!
//! Writers in different processes are not coordinated: the last document
//! written wins.

use crate::{KeyValueStore, Result, StorageError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::Mutex;
use tokio::task;

type Document = Map<String, Value>;

/// Durable key-value store backed by one JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    io_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or prepare to create) the store at `path`
    ///
    /// Fails with [`StorageError::Unavailable`] if the parent directory cannot
    /// be created or an existing document cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::io(parent, "create directory", err))?;
        }

        let store = Self {
            path,
            io_lock: Mutex::new(()),
        };
        let document = store.load().await?;
        tracing::debug!(
            path = %store.path.display(),
            keys = document.len(),
            "opened file store"
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Document::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                StorageError::Unavailable(format!(
                    "corrupt store document {}: {err}",
                    self.path.display()
                ))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(err) => Err(StorageError::io(&self.path, "read", err)),
        }
    }

    async fn save(&self, document: &Document) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let path = self.path.clone();
        task::spawn_blocking(move || replace_document(&path, &bytes))
            .await
            .map_err(|err| StorageError::Unavailable(format!("store writer failed: {err}")))?
    }
}

/// Write `bytes` to a fresh temp file beside `path`, then rename it over `path`
///
/// Every save gets its own temp file, so concurrent writers never move each
/// other's data.
fn replace_document(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|err| StorageError::io(dir, "create temp file in", err))?;
    temp.write_all(bytes)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|err| StorageError::io(temp.path(), "write", err))?;
    temp.persist(path)
        .map_err(|err| StorageError::io(path, "replace", err.error))?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let _guard = self.io_lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.io_lock.lock().await;
        let mut document = self.load().await?;
        document.insert(key.to_owned(), value);
        self.save(&document).await?;
        tracing::trace!(key, path = %self.path.display(), "wrote key");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.io_lock.lock().await;
        let mut document = self.load().await?;
        if document.remove(key).is_none() {
            return Ok(());
        }
        self.save(&document).await
    }
}
