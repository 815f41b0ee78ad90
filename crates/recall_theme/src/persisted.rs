//! Persisted theme envelope
//!
//! The theme is stored as
//!
//! ```json
//! { "state": { "theme": "light" }, "version": 1 }
//! ```
//!
//! Earlier builds wrote the bare theme id (`"light"`); that form is still
//! accepted on read. Envelopes from a newer version are rejected rather than
//! guessed at.

use crate::error::ThemeError;
use crate::theme::ThemeName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default storage key for the active theme
pub const THEME_STORAGE_KEY: &str = "sr-theme";

/// Envelope version written by this build
pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedThemeState {
    pub theme: ThemeName,
}

/// Serialized form of the theme preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTheme {
    pub state: PersistedThemeState,
    pub version: u32,
}

impl PersistedTheme {
    pub fn new(theme: ThemeName) -> Self {
        Self {
            state: PersistedThemeState { theme },
            version: ENVELOPE_VERSION,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTheme {
    Envelope(PersistedTheme),
    Bare(ThemeName),
}

/// Encode a theme for the durable store
pub fn encode(theme: ThemeName) -> Value {
    serde_json::json!({
        "state": { "theme": theme.as_str() },
        "version": ENVELOPE_VERSION,
    })
}

/// Decode a stored value, rejecting anything that is not a known theme
pub fn decode(value: &Value) -> Result<ThemeName, ThemeError> {
    match StoredTheme::deserialize(value) {
        Ok(StoredTheme::Bare(theme)) => Ok(theme),
        Ok(StoredTheme::Envelope(envelope)) if envelope.version <= ENVELOPE_VERSION => {
            Ok(envelope.state.theme)
        }
        Ok(StoredTheme::Envelope(envelope)) => Err(ThemeError::InvalidPersistedValue(format!(
            "envelope version {} is newer than {ENVELOPE_VERSION}",
            envelope.version
        ))),
        Err(_) => Err(ThemeError::InvalidPersistedValue(value.to_string())),
    }
}
