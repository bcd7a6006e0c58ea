//! Shared numeric constants for the planner crate.

// ── Field ───────────────────────────────────────────────────────

/// Default field width in meters.
pub const DEFAULT_FIELD_WIDTH_M: f64 = 20.0;

/// Default field height in meters.
pub const DEFAULT_FIELD_HEIGHT_M: f64 = 15.0;

// ── Items ───────────────────────────────────────────────────────

/// Largest accepted item width or height, in meters.
pub const MAX_ITEM_SIZE_M: f64 = 20.0;

/// Value an invalid or non-positive size snaps to when an edit is finalized.
pub const MIN_COMMITTED_SIZE_M: f64 = 0.01;

/// Two sizes closer than this are treated as unchanged on commit.
pub const SIZE_EPSILON_M: f64 = 0.001;

/// Where the explicit "add" action drops a new item.
pub const DEFAULT_ADD_X_M: f64 = 2.5;

/// Where the explicit "add" action drops a new item.
pub const DEFAULT_ADD_Y_M: f64 = 2.5;

// ── Screen ──────────────────────────────────────────────────────

/// Fixed pixel offset around the field for rulers and labels.
pub const MARGIN_PX: f64 = 40.0;

/// Scale used before the first viewport measurement arrives.
pub const DEFAULT_SCALE_PX_PER_M: f64 = 30.0;

// ── Interaction ─────────────────────────────────────────────────

/// How long a press must be held on an item before deletion is offered.
pub const LONG_PRESS_MS: f64 = 800.0;

/// Pointer travel, in screen pixels, that turns a press into a drag.
pub const DRAG_TOLERANCE_PX: f64 = 6.0;

/// Minimum interval between drag redraws (~60 updates per second).
pub const FRAME_INTERVAL_MS: f64 = 16.0;

// ── Export ──────────────────────────────────────────────────────

/// Export image scale in pixels per meter.
pub const EXPORT_PX_PER_M: f64 = 50.0;

/// Margin around the field in the exported image.
pub const EXPORT_MARGIN_PX: f64 = 60.0;

/// Height of the title band above the exported layout.
pub const EXPORT_TITLE_PX: f64 = 50.0;

/// Height of the metrics footer below the exported layout.
pub const EXPORT_FOOTER_PX: f64 = 80.0;
