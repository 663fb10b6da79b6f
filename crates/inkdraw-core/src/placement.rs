//! Context-menu placement for the floating style panel.
//!
//! The panel opens at the pointer, flips to the opposite side of the cursor
//! when it would overflow the canvas, and is finally clamped fully inside the
//! canvas container.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Estimated size of the style panel when the real size is not yet known.
pub const DEFAULT_PANEL_SIZE: Size = Size::new(240.0, 300.0);

/// Bounding rectangle of the canvas container in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Compute the panel's top-left corner relative to the container.
///
/// `pointer` is in client coordinates. The result always satisfies
/// `0 <= x <= max(0, container.width - panel.width)` and the same for `y`.
pub fn place_panel(pointer: Point, container: ClientRect, panel: Size) -> Point {
    let local_x = pointer.x - container.left;
    let local_y = pointer.y - container.top;

    let x = flip_axis(local_x, panel.width, container.width);
    let y = flip_axis(local_y, panel.height, container.height);

    Point::new(
        clamp_axis(x, panel.width, container.width),
        clamp_axis(y, panel.height, container.height),
    )
}

fn flip_axis(offset: f64, extent: f64, available: f64) -> f64 {
    if offset + extent > available {
        (offset - extent).max(0.0)
    } else {
        offset
    }
}

fn clamp_axis(offset: f64, extent: f64, available: f64) -> f64 {
    offset.min(available - extent).max(0.0)
}
