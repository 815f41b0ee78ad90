//! Theme store behavior: notification, hydration and write-through

use async_trait::async_trait;
use recall_storage::{FileStore, KeyValueStore, MemoryStore, Namespaced, StorageError};
use recall_theme::persisted::encode;
use recall_theme::{ThemeError, ThemeName, ThemeStore, ThemeStoreConfig, THEME_STORAGE_KEY};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use tokio::sync::Notify;

/// Backend whose medium cannot be opened at all
struct UnavailableStore;

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn read(&self, _key: &str) -> recall_storage::Result<Option<Value>> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    async fn write(&self, _key: &str, _value: Value) -> recall_storage::Result<()> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    async fn delete(&self, _key: &str) -> recall_storage::Result<()> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}

/// Backend whose reads block until released, announcing when they start
struct GatedStore {
    inner: MemoryStore,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn read(&self, key: &str) -> recall_storage::Result<Option<Value>> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: Value) -> recall_storage::Result<()> {
        self.inner.write(key, value).await
    }

    async fn delete(&self, key: &str) -> recall_storage::Result<()> {
        self.inner.delete(key).await
    }
}

fn memory_store(entries: Vec<(&str, Value)>) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_entries(entries))
}

fn counting_listener(store: &ThemeStore) -> (Arc<AtomicUsize>, Arc<Mutex<Vec<ThemeName>>>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (c, s) = (Arc::clone(&count), Arc::clone(&seen));
    store.subscribe(move |&theme| {
        c.fetch_add(1, Ordering::SeqCst);
        s.lock().unwrap().push(theme);
    });
    (count, seen)
}

#[tokio::test]
async fn defaults_before_hydration() {
    let store = ThemeStore::spawn(memory_store(vec![]), ThemeStoreConfig::default());
    assert_eq!(store.get_theme(), ThemeName::Dark);
    assert!(!store.is_initialized());
    assert_eq!(store.config().storage_key, THEME_STORAGE_KEY);
}

#[tokio::test]
async fn set_theme_same_value_notifies_each_time() {
    let store = ThemeStore::spawn(memory_store(vec![]), ThemeStoreConfig::default());
    let (count, seen) = counting_listener(&store);

    store.set_theme(ThemeName::Dark);
    store.set_theme(ThemeName::Dark);

    assert_eq!(store.get_theme(), ThemeName::Dark);
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(*seen.lock().unwrap(), vec![ThemeName::Dark, ThemeName::Dark]);
}

#[tokio::test]
async fn listeners_run_synchronously_in_subscription_order() {
    let store = ThemeStore::spawn(memory_store(vec![]), ThemeStoreConfig::default());
    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["a", "b", "c"] {
        let order = Arc::clone(&order);
        store.subscribe(move |theme| order.lock().unwrap().push(format!("{name}:{theme}")));
    }

    store.set_theme(ThemeName::Light);

    // Already delivered by the time set_theme returned
    assert_eq!(
        *order.lock().unwrap(),
        vec!["a:light", "b:light", "c:light"]
    );
}

#[tokio::test]
async fn listener_may_unsubscribe_itself_during_notification() {
    let store = ThemeStore::spawn(memory_store(vec![]), ThemeStoreConfig::default());
    let log = Arc::new(Mutex::new(Vec::new()));

    let own_id = Arc::new(OnceLock::new());
    let id = store.subscribe({
        let log = Arc::clone(&log);
        let own_id = Arc::clone(&own_id);
        let weak = Arc::downgrade(&store);
        move |_| {
            log.lock().unwrap().push("once");
            if let (Some(store), Some(id)) = (weak.upgrade(), own_id.get()) {
                assert!(store.unsubscribe(*id));
            }
        }
    });
    own_id.set(id).unwrap();

    for name in ["second", "third"] {
        let log = Arc::clone(&log);
        store.subscribe(move |_| log.lock().unwrap().push(name));
    }

    store.set_theme(ThemeName::Light);
    assert_eq!(*log.lock().unwrap(), vec!["once", "second", "third"]);
    assert_eq!(store.subscriber_count(), 2);

    store.set_theme(ThemeName::Dark);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["once", "second", "third", "second", "third"]
    );
}

#[tokio::test]
async fn unsubscribed_listener_is_not_called() {
    let store = ThemeStore::spawn(memory_store(vec![]), ThemeStoreConfig::default());
    let (count, _) = counting_listener(&store);
    let id = store.subscribe(|_| panic!("should have been removed"));

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set_theme(ThemeName::Light);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hydration_without_persisted_value_keeps_default() {
    let store = ThemeStore::spawn(memory_store(vec![]), ThemeStoreConfig::default());
    let (count, _) = counting_listener(&store);

    assert!(!store.is_initialized());
    store.hydrate().await;

    assert!(store.is_initialized());
    assert_eq!(store.get_theme(), ThemeName::Dark);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn hydration_applies_persisted_theme_and_notifies() {
    let storage = memory_store(vec![(THEME_STORAGE_KEY, encode(ThemeName::Light))]);
    let store = ThemeStore::spawn(storage, ThemeStoreConfig::default());
    let (_, seen) = counting_listener(&store);

    store.hydrate().await;

    assert_eq!(store.get_theme(), ThemeName::Light);
    assert_eq!(*seen.lock().unwrap(), vec![ThemeName::Light]);
    assert!(store.snapshot().initialized);
}

#[tokio::test]
async fn hydration_accepts_bare_legacy_value() {
    let storage = memory_store(vec![(THEME_STORAGE_KEY, json!("light"))]);
    let store = ThemeStore::spawn(storage, ThemeStoreConfig::default());
    store.hydrate().await;
    assert_eq!(store.get_theme(), ThemeName::Light);
}

#[tokio::test]
async fn invalid_persisted_value_falls_back_to_default() {
    let storage = memory_store(vec![(THEME_STORAGE_KEY, json!("blue"))]);
    let store = ThemeStore::spawn(
        Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );
    let (count, _) = counting_listener(&store);

    store.hydrate().await;

    assert_eq!(store.get_theme(), ThemeName::Dark);
    assert!(store.is_initialized());
    assert_eq!(count.load(Ordering::SeqCst), 0);

    // The bad value is replaced by the next successful write
    store.set_theme(ThemeName::Light);
    store.flush().await;
    assert_eq!(storage.get(THEME_STORAGE_KEY), Some(encode(ThemeName::Light)));
}

#[tokio::test]
async fn unavailable_storage_hydrates_as_absent() {
    let store = ThemeStore::spawn(Arc::new(UnavailableStore), ThemeStoreConfig::default());
    store.hydrate().await;
    assert!(store.is_initialized());
    assert_eq!(store.get_theme(), ThemeName::Dark);
}

#[tokio::test]
async fn failed_write_keeps_in_memory_theme() {
    let store = ThemeStore::spawn(Arc::new(UnavailableStore), ThemeStoreConfig::default());
    store.hydrate().await;

    store.set_theme(ThemeName::Light);
    store.flush().await;

    assert_eq!(store.get_theme(), ThemeName::Light);
}

#[tokio::test]
async fn second_hydrate_is_ignored() {
    let storage = memory_store(vec![(THEME_STORAGE_KEY, encode(ThemeName::Light))]);
    let store = ThemeStore::spawn(
        Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );
    let (count, _) = counting_listener(&store);

    store.hydrate().await;
    store.set_theme(ThemeName::Dark);
    store.flush().await;
    storage.write(THEME_STORAGE_KEY, encode(ThemeName::Light)).await.unwrap();
    store.hydrate().await;

    assert_eq!(store.get_theme(), ThemeName::Dark);
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert!(store.is_initialized());
}

#[tokio::test]
async fn explicit_choice_during_hydration_wins() {
    let gated = Arc::new(GatedStore {
        inner: MemoryStore::with_entries([(THEME_STORAGE_KEY, encode(ThemeName::Light))]),
        entered: Notify::new(),
        release: Notify::new(),
    });
    let store = ThemeStore::spawn(
        Arc::clone(&gated) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );

    let hydration = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.hydrate().await }
    });

    gated.entered.notified().await;
    assert!(!store.is_initialized());
    store.set_theme(ThemeName::Dark);
    gated.release.notify_one();
    hydration.await.unwrap();

    assert!(store.is_initialized());
    assert_eq!(store.get_theme(), ThemeName::Dark);
}

#[tokio::test]
async fn burst_of_writes_persists_last_value() {
    let storage = memory_store(vec![]);
    let store = ThemeStore::spawn(
        Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );

    for theme in [
        ThemeName::Light,
        ThemeName::Dark,
        ThemeName::Light,
        ThemeName::Dark,
        ThemeName::Light,
    ] {
        store.set_theme(theme);
    }
    store.flush().await;

    assert_eq!(storage.get(THEME_STORAGE_KEY), Some(encode(ThemeName::Light)));
}

#[tokio::test]
async fn invalid_theme_name_is_rejected_without_side_effects() {
    let storage = memory_store(vec![]);
    let store = ThemeStore::spawn(
        Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );
    let (count, _) = counting_listener(&store);

    let err = store.set_theme_named("blue").unwrap_err();
    assert!(matches!(err, ThemeError::InvalidTheme(_)));
    store.flush().await;

    assert_eq!(store.get_theme(), ThemeName::Dark);
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(storage.is_empty());

    store.set_theme_named("Light").unwrap();
    assert_eq!(store.get_theme(), ThemeName::Light);
}

#[tokio::test]
async fn toggle_flips_and_persists() {
    let storage = memory_store(vec![]);
    let store = ThemeStore::spawn(
        Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );

    assert_eq!(store.toggle_theme(), ThemeName::Light);
    assert_eq!(store.toggle_theme(), ThemeName::Dark);
    store.flush().await;
    assert_eq!(storage.get(THEME_STORAGE_KEY), Some(encode(ThemeName::Dark)));
}

#[tokio::test]
async fn theme_survives_restart_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recall.json");

    {
        let storage = Arc::new(FileStore::open(&path).await.unwrap());
        let store = ThemeStore::spawn(storage, ThemeStoreConfig::default());
        store.hydrate().await;
        store.set_theme(ThemeName::Light);
        store.flush().await;
    }

    let storage = Arc::new(FileStore::open(&path).await.unwrap());
    let store = ThemeStore::spawn(storage, ThemeStoreConfig::default());
    store.hydrate().await;
    assert_eq!(store.get_theme(), ThemeName::Light);
}

#[tokio::test]
async fn custom_key_and_namespace_are_respected() {
    let shared = Arc::new(MemoryStore::new());
    let storage = Arc::new(Namespaced::new(Arc::clone(&shared), "recall"));
    let config = ThemeStoreConfig {
        storage_key: "appearance-theme".into(),
        default_theme: ThemeName::Light,
    };
    let store = ThemeStore::spawn(storage, config);
    assert_eq!(store.get_theme(), ThemeName::Light);

    store.set_theme(ThemeName::Dark);
    store.flush().await;
    assert_eq!(
        shared.get("recall:appearance-theme"),
        Some(encode(ThemeName::Dark))
    );
    assert_eq!(shared.get(THEME_STORAGE_KEY), None);
}

#[tokio::test]
async fn store_without_worker_stays_usable() {
    let (store, worker) = ThemeStore::new(memory_store(vec![]), ThemeStoreConfig::default());
    drop(worker);

    store.set_theme(ThemeName::Light);
    store.flush().await;
    assert_eq!(store.get_theme(), ThemeName::Light);
}

#[tokio::test]
async fn worker_can_be_driven_by_caller() {
    let storage = memory_store(vec![]);
    let (store, worker) = ThemeStore::new(
        Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );
    let handle = tokio::spawn(worker.run());

    store.set_theme(ThemeName::Light);
    store.flush().await;
    assert_eq!(storage.get(THEME_STORAGE_KEY), Some(encode(ThemeName::Light)));

    // Dropping the last store handle ends the worker
    drop(store);
    handle.await.unwrap();
}

#[tokio::test]
async fn global_install_happens_once() {
    let store = ThemeStore::spawn(memory_store(vec![]), ThemeStoreConfig::default());
    ThemeStore::install(Arc::clone(&store)).unwrap();

    let installed = ThemeStore::try_get().unwrap();
    assert!(Arc::ptr_eq(&installed, &store));

    let other = ThemeStore::spawn(memory_store(vec![]), ThemeStoreConfig::default());
    assert!(matches!(
        ThemeStore::install(other),
        Err(ThemeError::AlreadyInstalled)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_setters_agree_on_final_theme() {
    let storage = memory_store(vec![]);
    let store = ThemeStore::spawn(
        Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );
    let (count, seen) = counting_listener(&store);

    let threads: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for round in 0..50 {
                    let theme = if (i + round) % 2 == 0 {
                        ThemeName::Light
                    } else {
                        ThemeName::Dark
                    };
                    store.set_theme(theme);
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }
    store.flush().await;

    let current = store.get_theme();
    assert_eq!(count.load(Ordering::SeqCst), 400);
    assert_eq!(seen.lock().unwrap().last().copied(), Some(current));
    assert_eq!(storage.get(THEME_STORAGE_KEY), Some(encode(current)));
}

#[tokio::test]
async fn listener_may_set_theme_during_hydration_notification() {
    let storage = memory_store(vec![(THEME_STORAGE_KEY, encode(ThemeName::Light))]);
    let store = ThemeStore::spawn(
        Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        ThemeStoreConfig::default(),
    );
    let weak = Arc::downgrade(&store);
    store.subscribe(move |&theme| {
        if theme == ThemeName::Light {
            if let Some(store) = weak.upgrade() {
                store.set_theme(ThemeName::Dark);
            }
        }
    });

    store.hydrate().await;
    store.flush().await;

    assert_eq!(store.get_theme(), ThemeName::Dark);
    assert_eq!(storage.get(THEME_STORAGE_KEY), Some(encode(ThemeName::Dark)));
}
