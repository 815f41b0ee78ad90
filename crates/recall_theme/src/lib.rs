//! Recall Theme System
//!
//! Persisted light/dark theme state and the palettes derived from it.
//!
//! # Overview
//!
//! - [`ThemeName`]: the two visual modes, `light` and `dark` (default)
//! - [`derive_palette`]: pure mapping from a theme to its [`ThemePalette`]
//! - [`ThemeStore`]: process-wide theme state with hydration from, and
//!   write-through to, a [`recall_storage::KeyValueStore`]
//! - [`PaletteAccessor`]: palette reads memoized by theme value
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use recall_storage::MemoryStore;
//! use recall_theme::{ThemeName, ThemeStore, ThemeStoreConfig};
//! use std::sync::Arc;
//!
//! let store = ThemeStore::spawn(Arc::new(MemoryStore::new()), ThemeStoreConfig::default());
//! store.hydrate().await;
//!
//! let palettes = store.palette_accessor();
//! store.set_theme(ThemeName::Light);
//! assert_eq!(palettes.palette().background.to_css(), "#ffffff");
//! ```
//!
//! # Failure behavior
//!
//! Storage problems never reach the user. An unreadable or unrecognized
//! persisted value hydrates as the default theme, and failed write-throughs
//! are logged while the in-memory theme stays in effect.

pub mod accessor;
pub mod error;
pub mod palette;
pub mod persisted;
pub mod store;
pub mod theme;

pub use accessor::{use_theme_palette, PaletteAccessor};
pub use error::{Result, ThemeError};
pub use palette::{derive_palette, PaletteToken, ThemePalette};
pub use persisted::{PersistedTheme, ENVELOPE_VERSION, THEME_STORAGE_KEY};
pub use store::{PersistWorker, SubscriptionId, ThemeSnapshot, ThemeStore, ThemeStoreConfig};
pub use theme::ThemeName;
