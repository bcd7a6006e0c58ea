#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

use crate::consts::{DEFAULT_SCALE_PX_PER_M, MARGIN_PX};
use crate::model::Field;

/// A point in either field space (meters) or render space (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Field-space <-> render-space transform.
///
/// `scale` is in pixels per meter. `margin` is the fixed pixel offset on every
/// side of the field, reserved for rulers and labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub scale: f64,
    pub margin: f64,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE_PX_PER_M, margin: MARGIN_PX }
    }
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(scale: f64, margin: f64) -> Self {
        Self { scale, margin }
    }

    /// Convert a field-space point (meters) to render space (pixels).
    #[must_use]
    pub fn to_screen(&self, field: Point) -> Point {
        Point {
            x: self.margin + field.x * self.scale,
            y: self.margin + field.y * self.scale,
        }
    }

    /// Convert a render-space point (pixels) to field space (meters).
    #[must_use]
    pub fn to_field(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.margin) / self.scale,
            y: (screen.y - self.margin) / self.scale,
        }
    }

    /// Convert a field-space length to pixels.
    #[must_use]
    pub fn len_to_screen(&self, meters: f64) -> f64 {
        meters * self.scale
    }

    /// Recompute `scale` so the field fits the container, keeping its aspect ratio.
    ///
    /// The container size is the whole available surface; the margin on each
    /// side is subtracted before fitting. Returns the pixel size of the field
    /// area (excluding margins). Degenerate containers keep the old scale.
    pub fn fit(&mut self, container_width: f64, container_height: f64, field: Field) -> (f64, f64) {
        let avail_w = container_width - 2.0 * self.margin;
        let avail_h = container_height - 2.0 * self.margin;
        if avail_w > 0.0 && avail_h > 0.0 {
            let field_aspect = field.width / field.height;
            let render_width = if avail_w / avail_h > field_aspect {
                // Container is wider than the field: height decides.
                avail_h * field_aspect
            } else {
                avail_w
            };
            self.scale = render_width / field.width;
        }
        self.field_size_px(field)
    }

    /// Pixel size of the field area at the current scale.
    #[must_use]
    pub fn field_size_px(&self, field: Field) -> (f64, f64) {
        (field.width * self.scale, field.height * self.scale)
    }

    /// Full surface size: the field plus a margin on every side.
    #[must_use]
    pub fn surface_size_px(&self, field: Field) -> (f64, f64) {
        let (w, h) = self.field_size_px(field);
        (w + 2.0 * self.margin, h + 2.0 * self.margin)
    }
}
