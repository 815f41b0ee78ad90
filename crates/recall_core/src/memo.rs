//! Single-slot memoization keyed by input value
//!
//! A [`Memo`] remembers the last derived value together with the key it was
//! derived from. Reading with the same key returns the cached value; a
//! different key recomputes and replaces it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

pub struct Memo<K, V> {
    slot: Mutex<Option<(K, Arc<V>)>>,
    computations: AtomicU64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            computations: AtomicU64::new(0),
        }
    }

    /// Number of times the derivation has run
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::SeqCst)
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    /// Return the cached value for `key`, deriving it first if the key changed
    pub fn get_or_compute<F>(&self, key: &K, derive: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_key, value)) = slot.as_ref() {
            if cached_key == key {
                return Arc::clone(value);
            }
        }

        let value = Arc::new(derive(key));
        self.computations.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(
            computations = self.computations.load(Ordering::SeqCst),
            "memo recomputed"
        );
        *slot = Some((key.clone(), Arc::clone(&value)));
        value
    }

    /// Key of the cached value, if any
    pub fn cached_key(&self) -> Option<K> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(key, _)| key.clone())
    }
}
