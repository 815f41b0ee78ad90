//! Ordered listener registry
//!
//! Listeners are kept in registration order. Notification works on a
//! [`snapshot`](ListenerRegistry::snapshot) of the registry, so the owner can
//! release its lock before invoking callbacks and a callback may add or remove
//! listeners (including itself) without disturbing the event in flight.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Shared callback invoked with a reference to the published value
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle identifying a registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Insertion-ordered collection of listeners
pub struct ListenerRegistry<T> {
    next_id: u64,
    listeners: IndexMap<ListenerId, Listener<T>>,
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: IndexMap::new(),
        }
    }

    /// Register a listener; ids are never reused
    pub fn insert<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Arc::new(listener));
        id
    }

    /// Remove a listener, returning whether it was registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        // shift_remove keeps the remaining listeners in registration order
        self.listeners.shift_remove(&id).is_some()
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Clone the current listeners in registration order
    pub fn snapshot(&self) -> Vec<Listener<T>> {
        self.listeners.values().cloned().collect()
    }
}

impl<T> fmt::Debug for ListenerRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
