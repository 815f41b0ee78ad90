//! Palette accessor
//!
//! [`PaletteAccessor`] hands render code the palette for the store's current
//! theme. The palette is memoized by theme value: repeated reads, and store
//! notifications that re-commit the same theme, reuse the cached palette.

use crate::palette::{derive_palette, ThemePalette};
use crate::store::{SubscriptionId, ThemeStore};
use crate::theme::ThemeName;
use recall_core::Memo;
use std::sync::{Arc, Mutex, PoisonError};

/// Read-only, memoized view of the current palette
#[derive(Clone)]
pub struct PaletteAccessor {
    store: Arc<ThemeStore>,
    memo: Arc<Memo<ThemeName, ThemePalette>>,
}

impl PaletteAccessor {
    pub fn new(store: Arc<ThemeStore>) -> Self {
        Self {
            store,
            memo: Arc::new(Memo::new()),
        }
    }

    /// Palette for the most recently committed theme
    pub fn palette(&self) -> Arc<ThemePalette> {
        palette_for(&self.memo, self.store.get_theme())
    }

    pub fn theme(&self) -> ThemeName {
        self.store.get_theme()
    }

    /// How many times a palette has been derived
    pub fn recomputations(&self) -> u64 {
        self.memo.computations()
    }

    /// Call `on_change` whenever the theme value actually changes
    ///
    /// Store notifications that re-commit the theme already seen are skipped.
    /// Remove the watcher with [`ThemeStore::unsubscribe`].
    pub fn watch<F>(&self, on_change: F) -> SubscriptionId
    where
        F: Fn(ThemeName, &ThemePalette) + Send + Sync + 'static,
    {
        let memo = Arc::clone(&self.memo);
        let last_seen = Mutex::new(self.store.get_theme());
        self.store.subscribe(move |&theme| {
            {
                let mut last = last_seen.lock().unwrap_or_else(PoisonError::into_inner);
                if *last == theme {
                    return;
                }
                *last = theme;
            }
            let palette = palette_for(&memo, theme);
            on_change(theme, &palette);
        })
    }
}

fn palette_for(memo: &Memo<ThemeName, ThemePalette>, theme: ThemeName) -> Arc<ThemePalette> {
    memo.get_or_compute(&theme, |&theme| derive_palette(theme))
}

/// Palette accessor for `store`, the counterpart of a `use_theme_palette` hook
pub fn use_theme_palette(store: &Arc<ThemeStore>) -> PaletteAccessor {
    store.palette_accessor()
}
