//! Light/dark toggle button model

use recall_theme::{ThemeName, ThemeStore};

/// What the theme toggle shows for the current theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeToggle {
    pub current: ThemeName,
}

impl ThemeToggle {
    pub fn new(current: ThemeName) -> Self {
        Self { current }
    }

    pub fn for_store(store: &ThemeStore) -> Self {
        Self::new(store.get_theme())
    }

    /// Theme a click switches to
    pub fn next(&self) -> ThemeName {
        self.current.toggle()
    }

    /// Pressed while dark mode is active
    pub fn pressed(&self) -> bool {
        self.current.is_dark()
    }

    pub fn aria_label(&self) -> String {
        format!("Switch to {} theme", self.next())
    }

    /// Button caption naming the target mode
    pub fn caption(&self) -> &'static str {
        match self.next() {
            ThemeName::Light => "Light",
            ThemeName::Dark => "Dark",
        }
    }

    /// Apply the click to `store`, returning the refreshed model
    pub fn click(&self, store: &ThemeStore) -> Self {
        store.toggle_theme();
        Self::for_store(store)
    }
}
