//! Feature flags
//!
//! Flags are read once from the environment. Recognized values are
//! case-insensitive and trimmed; anything else falls back to the flag's
//! default.

use std::sync::OnceLock;

const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];
const FALSY: [&str; 4] = ["0", "false", "no", "off"];

/// Environment variable enabling read access to subjects
pub const SUBJECTS_READ_VAR: &str = "RECALL_FF_SUBJECTS_READ";
/// Environment variable enabling write access to subjects
pub const SUBJECTS_WRITE_VAR: &str = "RECALL_FF_SUBJECTS_WRITE";

static FEATURE_FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Parse a boolean-like flag value
pub fn parse_boolean_flag(value: Option<&str>, default: bool) -> bool {
    let Some(value) = value else {
        return default;
    };
    let normalized = value.trim().to_ascii_lowercase();
    if TRUTHY.contains(&normalized.as_str()) {
        true
    } else if FALSY.contains(&normalized.as_str()) {
        false
    } else {
        default
    }
}

/// Process-wide feature switches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureFlags {
    pub subjects_read: bool,
    pub subjects_write: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            subjects_read: false,
            subjects_write: true,
        }
    }
}

impl FeatureFlags {
    /// Build flags from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            subjects_read: parse_boolean_flag(
                lookup(SUBJECTS_READ_VAR).as_deref(),
                defaults.subjects_read,
            ),
            subjects_write: parse_boolean_flag(
                lookup(SUBJECTS_WRITE_VAR).as_deref(),
                defaults.subjects_write,
            ),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Flags for this process, read from the environment on first use
    pub fn global() -> &'static FeatureFlags {
        FEATURE_FLAGS.get_or_init(|| {
            let flags = Self::from_env();
            tracing::debug!(?flags, "feature flags loaded");
            flags
        })
    }
}
