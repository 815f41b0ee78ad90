//! Pointer-position style variables
//!
//! Hover effects on cards read the pointer position from two CSS custom
//! properties. The offset is measured from the surface's top-left corner.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Horizontal pointer offset variable
pub const POINTER_X_VAR: &str = "--card-mouse-x";
/// Vertical pointer offset variable
pub const POINTER_Y_VAR: &str = "--card-mouse-y";

/// Bounding box of a surface in client coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Pointer position relative to a surface
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

/// Anything that carries inline style properties
pub trait StyleProperties {
    fn set_property(&mut self, name: &str, value: String);
    fn remove_property(&mut self, name: &str);
}

impl StyleProperties for FxHashMap<String, String> {
    fn set_property(&mut self, name: &str, value: String) {
        self.insert(name.to_owned(), value);
    }

    fn remove_property(&mut self, name: &str) {
        self.remove(name);
    }
}

impl StyleProperties for BTreeMap<String, String> {
    fn set_property(&mut self, name: &str, value: String) {
        self.insert(name.to_owned(), value);
    }

    fn remove_property(&mut self, name: &str) {
        self.remove(name);
    }
}

/// Offset of a client-space pointer from the surface origin
///
/// Not clamped: a pointer outside the surface yields negative or oversized
/// offsets.
pub fn pointer_offset(rect: SurfaceRect, client_x: f32, client_y: f32) -> PointerOffset {
    PointerOffset {
        x: client_x - rect.left,
        y: client_y - rect.top,
    }
}

/// Write the pointer offset variables onto `target`
pub fn update_pointer_position<S: StyleProperties + ?Sized>(
    target: &mut S,
    rect: SurfaceRect,
    client_x: f32,
    client_y: f32,
) -> PointerOffset {
    let offset = pointer_offset(rect, client_x, client_y);
    target.set_property(POINTER_X_VAR, format!("{}px", offset.x));
    target.set_property(POINTER_Y_VAR, format!("{}px", offset.y));
    offset
}

/// Remove both pointer offset variables from `target`
pub fn reset_pointer_position<S: StyleProperties + ?Sized>(target: &mut S) {
    target.remove_property(POINTER_X_VAR);
    target.remove_property(POINTER_Y_VAR);
}
