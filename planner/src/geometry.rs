//! Axis-aligned rectangle math in field space.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// True when the two boxes overlap with positive area.
///
/// Edges that only touch do not count: all four half-plane tests are strict.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn intersects(ax: f64, ay: f64, aw: f64, ah: f64, bx: f64, by: f64, bw: f64, bh: f64) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

/// An axis-aligned box: top-left corner plus size, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Positive-area overlap test, see [`intersects`].
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self.x, self.y, self.width, self.height, other.x, other.y, other.width, other.height)
    }

    /// Inclusive point containment; points on the border are inside.
    #[must_use]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}
