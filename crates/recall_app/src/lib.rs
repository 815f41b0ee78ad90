//! Recall application collaborators
//!
//! The pieces of the UI layer that sit next to the theme core without owning
//! any of its state:
//!
//! - [`flags`]: boolean feature flags parsed from the environment
//! - [`icons`]: subject icon catalog with a fallback for unknown names
//! - [`pointer`]: pointer-position style variables for hover effects
//! - [`toggle`]: view model for the light/dark toggle button

pub mod flags;
pub mod icons;
pub mod pointer;
pub mod toggle;

pub use flags::{parse_boolean_flag, FeatureFlags};
pub use icons::{resolve_icon, search_icons, IconOption, FALLBACK_ICON, ICON_OPTIONS};
pub use pointer::{
    pointer_offset, reset_pointer_position, update_pointer_position, PointerOffset,
    StyleProperties, SurfaceRect, POINTER_X_VAR, POINTER_Y_VAR,
};
pub use toggle::ThemeToggle;
