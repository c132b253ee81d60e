//! Pointer input boundary. Only clicks inside the staff's interactive
//! rectangle reach the grid; everything else is ignored.

use crate::config::GridConfig;

/// Interactive rectangle in absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl HitRect {
    pub fn of(config: &GridConfig) -> Self {
        let b = &config.bounds;
        Self {
            left: config.staff_left + b.left_inset,
            right: config.staff_right() - b.right_inset,
            top: config.staff_top - b.above_top,
            bottom: config.staff_top + b.below_top,
        }
    }

    /// Edges are inclusive. NaN coordinates are never inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Whether a click at `(x, y)` should place a note.
pub fn accepts_click(config: &GridConfig, x: f64, y: f64) -> bool {
    HitRect::of(config).contains(x, y)
}
