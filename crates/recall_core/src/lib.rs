//! Recall Core
//!
//! Small building blocks shared by the Recall crates:
//!
//! - **Color**: RGBA color values with CSS rendering
//! - **Listener registry**: insertion-ordered callbacks that can be removed
//!   while a notification is in flight
//! - **Memo**: a single-slot cache keyed by the value it was derived from
//!
//! # Example
//!
//! ```rust
//! use recall_core::{Color, ListenerRegistry};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let mut registry = ListenerRegistry::new();
//!
//! let sink = Arc::clone(&seen);
//! registry.insert(move |color: &Color| sink.lock().unwrap().push(color.to_css()));
//!
//! for listener in registry.snapshot() {
//!     listener(&Color::from_hex(0x3DEA95));
//! }
//! assert_eq!(seen.lock().unwrap().as_slice(), ["#3dea95"]);
//! ```

pub mod color;
pub mod listeners;
pub mod memo;

pub use color::Color;
pub use listeners::{Listener, ListenerId, ListenerRegistry};
pub use memo::Memo;
