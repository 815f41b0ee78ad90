//! Theme state store
//!
//! [`ThemeStore`] is the single source of truth for the active theme. Reads
//! never touch storage. Writes commit in memory, notify subscribers
//! synchronously in subscription order, and then hand the value to a
//! [`PersistWorker`] that writes it through to the durable store.
//!
//! Persistence is eventual: a failed write is logged and dropped, and the
//! in-memory theme is kept. Write-throughs go through one FIFO queue, so the
//! durable value after a burst of changes is the last one requested.
//!
//! ```rust,ignore
//! let storage = Arc::new(FileStore::open("data/recall.json").await?);
//! let store = ThemeStore::spawn(storage, ThemeStoreConfig::default());
//! store.hydrate().await;
//!
//! let id = store.subscribe(|theme| tracing::info!(%theme, "theme changed"));
//! store.set_theme(ThemeName::Light);
//! store.unsubscribe(id);
//! ```

use crate::accessor::PaletteAccessor;
use crate::error::{Result, ThemeError};
use crate::persisted::{self, THEME_STORAGE_KEY};
use crate::theme::ThemeName;
use recall_core::{ListenerId, ListenerRegistry};
use parking_lot::ReentrantMutex;
use recall_storage::KeyValueStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use tokio::sync::{mpsc, oneshot};

/// Process-wide store slot, see [`ThemeStore::install`]
static THEME_STORE: OnceLock<Arc<ThemeStore>> = OnceLock::new();

/// Handle returned by [`ThemeStore::subscribe`]
pub type SubscriptionId = ListenerId;

/// Store configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeStoreConfig {
    /// Key the theme is persisted under
    pub storage_key: String,
    /// Theme used until (and unless) hydration finds a persisted one
    pub default_theme: ThemeName,
}

impl Default for ThemeStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_owned(),
            default_theme: ThemeName::default(),
        }
    }
}

/// Read-only copy of the store's state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub theme: ThemeName,
    pub initialized: bool,
}

struct ThemeCell {
    theme: ThemeName,
    /// Bumped on every commit
    revision: u64,
}

/// Where a commit comes from
#[derive(Clone, Copy)]
enum CommitSource {
    /// A caller chose the theme; it is written through
    Explicit,
    /// Loaded from storage; dropped if anything committed since `revision`
    Hydrated { revision: u64 },
}

enum PersistCommand {
    Write(ThemeName),
    Flush(oneshot::Sender<()>),
}

/// Global theme state shared by every UI subtree
pub struct ThemeStore {
    config: ThemeStoreConfig,
    cell: RwLock<ThemeCell>,
    initialized: AtomicBool,
    hydration_started: AtomicBool,
    listeners: Mutex<ListenerRegistry<ThemeName>>,
    /// Held across commit and notify so listeners see commits in order.
    /// Reentrant: a listener may set the theme from its own callback.
    publishing: ReentrantMutex<()>,
    storage: Arc<dyn KeyValueStore>,
    persist_tx: mpsc::UnboundedSender<PersistCommand>,
}

impl ThemeStore {
    /// Create a store and the worker that performs its write-throughs
    ///
    /// The worker must be driven (see [`PersistWorker::run`]) for changes to
    /// reach storage; [`ThemeStore::spawn`] does that on the tokio runtime.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        config: ThemeStoreConfig,
    ) -> (Arc<Self>, PersistWorker) {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        let worker = PersistWorker {
            storage: Arc::clone(&storage),
            storage_key: config.storage_key.clone(),
            commands: persist_rx,
        };

        let store = Arc::new(Self {
            cell: RwLock::new(ThemeCell {
                theme: config.default_theme,
                revision: 0,
            }),
            initialized: AtomicBool::new(false),
            hydration_started: AtomicBool::new(false),
            listeners: Mutex::new(ListenerRegistry::new()),
            publishing: ReentrantMutex::new(()),
            storage,
            persist_tx,
            config,
        });
        (store, worker)
    }

    /// Create a store and spawn its persist worker on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(storage: Arc<dyn KeyValueStore>, config: ThemeStoreConfig) -> Arc<Self> {
        let (store, worker) = Self::new(storage, config);
        tokio::spawn(worker.run());
        store
    }

    /// Install `store` as the process-wide instance (once per process)
    pub fn install(store: Arc<ThemeStore>) -> Result<()> {
        THEME_STORE
            .set(store)
            .map_err(|_| ThemeError::AlreadyInstalled)
    }

    /// The process-wide instance, if one was installed
    pub fn try_get() -> Option<Arc<ThemeStore>> {
        THEME_STORE.get().cloned()
    }

    pub fn config(&self) -> &ThemeStoreConfig {
        &self.config
    }

    // ========== Reads ==========

    /// Current theme; never blocks on storage
    pub fn get_theme(&self) -> ThemeName {
        self.read_cell().theme
    }

    /// Whether the first hydration attempt has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            theme: self.get_theme(),
            initialized: self.is_initialized(),
        }
    }

    /// Memoized palette accessor bound to this store
    pub fn palette_accessor(self: &Arc<Self>) -> PaletteAccessor {
        PaletteAccessor::new(Arc::clone(self))
    }

    // ========== Writes ==========

    /// Commit `next`, queue the write-through and notify subscribers
    ///
    /// Subscribers are notified even when `next` equals the current theme.
    /// Concurrent callers are serialized: every subscriber sees changes in
    /// the order they were committed.
    pub fn set_theme(&self, next: ThemeName) {
        self.commit(next, CommitSource::Explicit);
    }

    /// Validate an untyped theme name and set it
    ///
    /// An unknown name fails with [`ThemeError::InvalidTheme`]; nothing is
    /// committed and no subscriber runs.
    pub fn set_theme_named(&self, name: &str) -> Result<()> {
        let next = name.parse::<ThemeName>()?;
        self.set_theme(next);
        Ok(())
    }

    /// Switch to the opposite theme, returning it
    pub fn toggle_theme(&self) -> ThemeName {
        let next = self.get_theme().toggle();
        self.set_theme(next);
        next
    }

    // ========== Subscriptions ==========

    /// Register a listener for committed theme changes
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ThemeName) + Send + Sync + 'static,
    {
        self.lock_listeners().insert(listener)
    }

    /// Remove a listener; returns whether it was registered
    ///
    /// Safe to call from inside a listener. The event being delivered still
    /// reaches every listener that was registered when it was committed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock_listeners().remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_listeners().len()
    }

    // ========== Persistence ==========

    /// Load the persisted theme (call once at startup)
    ///
    /// A valid persisted theme is committed and announced to subscribers. A
    /// missing, unrecognized or unreadable value leaves the current theme in
    /// place. Either way the store is initialized afterwards. If
    /// [`set_theme`](Self::set_theme) runs while the read is in flight, the
    /// explicit choice wins over the persisted value.
    pub async fn hydrate(&self) {
        if self.hydration_started.swap(true, Ordering::SeqCst) {
            tracing::debug!("theme hydration already started; ignoring");
            return;
        }

        let revision = self.read_cell().revision;
        match self.load_persisted().await {
            Ok(Some(theme)) => {
                if self.commit(theme, CommitSource::Hydrated { revision }) {
                    tracing::debug!(%theme, "hydrated persisted theme");
                } else {
                    tracing::debug!(
                        %theme,
                        "theme changed during hydration; keeping explicit choice"
                    );
                }
            }
            Ok(None) => {
                tracing::debug!(theme = %self.get_theme(), "no persisted theme; keeping default");
            }
            Err(err) => {
                tracing::warn!(error = %err, theme = %self.get_theme(), "ignoring persisted theme");
            }
        }

        self.initialized.store(true, Ordering::SeqCst);
    }

    /// Wait until every write-through queued so far has settled
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.persist_tx.send(PersistCommand::Flush(done_tx)).is_err() {
            return;
        }
        // A dropped sender means the worker stopped; nothing left to wait for
        let _ = done_rx.await;
    }

    async fn load_persisted(&self) -> Result<Option<ThemeName>> {
        let Some(value) = self.storage.read(&self.config.storage_key).await? else {
            return Ok(None);
        };
        persisted::decode(&value).map(Some)
    }

    // ========== Internals ==========

    /// Commit `next` and notify subscribers; returns whether it was applied
    ///
    /// The revision check, the state change and the write-through enqueue
    /// happen under one write lock, so persists are queued in commit order.
    fn commit(&self, next: ThemeName, source: CommitSource) -> bool {
        let _publishing = self.publishing.lock();
        {
            let mut cell = self.cell.write().unwrap_or_else(PoisonError::into_inner);
            match source {
                CommitSource::Hydrated { revision } if cell.revision != revision => return false,
                CommitSource::Hydrated { .. } => {}
                CommitSource::Explicit => self.enqueue(PersistCommand::Write(next)),
            }
            cell.theme = next;
            cell.revision += 1;
        }
        self.notify(next);
        true
    }

    fn notify(&self, theme: ThemeName) {
        // Listeners run without the registry lock so they may (un)subscribe
        let listeners = self.lock_listeners().snapshot();
        tracing::trace!(%theme, listeners = listeners.len(), "notifying theme listeners");
        for listener in listeners {
            listener(&theme);
        }
    }

    fn enqueue(&self, command: PersistCommand) {
        if self.persist_tx.send(command).is_err() {
            tracing::warn!("theme persist worker stopped; change kept in memory only");
        }
    }

    fn read_cell(&self) -> std::sync::RwLockReadGuard<'_, ThemeCell> {
        self.cell.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, ListenerRegistry<ThemeName>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serializes a store's write-throughs to the durable medium
///
/// Runs until the owning [`ThemeStore`] is dropped.
pub struct PersistWorker {
    storage: Arc<dyn KeyValueStore>,
    storage_key: String,
    commands: mpsc::UnboundedReceiver<PersistCommand>,
}

impl PersistWorker {
    pub async fn run(self) {
        let PersistWorker {
            storage,
            storage_key,
            mut commands,
        } = self;

        while let Some(command) = commands.recv().await {
            match command {
                PersistCommand::Write(theme) => {
                    persist(storage.as_ref(), &storage_key, theme).await
                }
                PersistCommand::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        tracing::debug!("theme persist worker finished");
    }
}

async fn persist(storage: &dyn KeyValueStore, key: &str, theme: ThemeName) {
    match storage.write(key, persisted::encode(theme)).await {
        Ok(()) => tracing::debug!(%theme, key, "persisted theme"),
        Err(err) => tracing::warn!(
            %theme,
            key,
            error = %err,
            "failed to persist theme; keeping in-memory value"
        ),
    }
}
