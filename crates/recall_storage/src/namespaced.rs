//! Key namespacing

use crate::{KeyValueStore, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Wraps a store and prefixes every key with `"<namespace>:"`
#[derive(Debug, Clone)]
pub struct Namespaced<S> {
    inner: S,
    namespace: String,
}

impl<S> Namespaced<S> {
    pub fn new(inner: S, namespace: impl Into<String>) -> Self {
        Self {
            inner,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The key as stored in the wrapped backend
    pub fn qualify(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_owned()
        } else {
            format!("{}:{key}", self.namespace)
        }
    }
}

#[async_trait]
impl<S: KeyValueStore> KeyValueStore for Namespaced<S> {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        self.inner.read(&self.qualify(key)).await
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        self.inner.write(&self.qualify(key), value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(&self.qualify(key)).await
    }
}
