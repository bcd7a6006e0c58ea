//! Editor settings with defaults from [`crate::consts`] and environment overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use crate::consts::{
    DEFAULT_FIELD_HEIGHT_M, DEFAULT_FIELD_WIDTH_M, DRAG_TOLERANCE_PX, EXPORT_PX_PER_M, FRAME_INTERVAL_MS,
    LONG_PRESS_MS, MARGIN_PX,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Initial field width in meters.
    pub field_width: f64,
    /// Initial field height in meters.
    pub field_height: f64,
    /// Ruler/label margin around the field, in pixels.
    pub margin_px: f64,
    /// Hold time before a press on an item offers deletion.
    pub long_press_ms: f64,
    /// Pointer travel that cancels the long-press and starts a drag.
    pub drag_tolerance_px: f64,
    /// Minimum interval between drag redraws.
    pub frame_interval_ms: f64,
    /// Export image scale.
    pub export_px_per_meter: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH_M,
            field_height: DEFAULT_FIELD_HEIGHT_M,
            margin_px: MARGIN_PX,
            long_press_ms: LONG_PRESS_MS,
            drag_tolerance_px: DRAG_TOLERANCE_PX,
            frame_interval_ms: FRAME_INTERVAL_MS,
            export_px_per_meter: EXPORT_PX_PER_M,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional (defaults in parentheses):
    /// - `FLOORPLAN_FIELD_WIDTH` (20)
    /// - `FLOORPLAN_FIELD_HEIGHT` (15)
    /// - `FLOORPLAN_MARGIN_PX` (40)
    /// - `FLOORPLAN_LONG_PRESS_MS` (800)
    /// - `FLOORPLAN_DRAG_TOLERANCE_PX` (6)
    /// - `FLOORPLAN_FRAME_INTERVAL_MS` (16)
    /// - `FLOORPLAN_EXPORT_PX_PER_METER` (50)
    ///
    /// Missing, unparseable, or non-positive values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Same as [`EditorConfig::from_env`] over an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let d = Self::default();
        let get = |key: &str, default: f64| positive_or(lookup(key), default);
        Self {
            field_width: get("FLOORPLAN_FIELD_WIDTH", d.field_width),
            field_height: get("FLOORPLAN_FIELD_HEIGHT", d.field_height),
            margin_px: get("FLOORPLAN_MARGIN_PX", d.margin_px),
            long_press_ms: get("FLOORPLAN_LONG_PRESS_MS", d.long_press_ms),
            drag_tolerance_px: get("FLOORPLAN_DRAG_TOLERANCE_PX", d.drag_tolerance_px),
            frame_interval_ms: get("FLOORPLAN_FRAME_INTERVAL_MS", d.frame_interval_ms),
            export_px_per_meter: get("FLOORPLAN_EXPORT_PX_PER_METER", d.export_px_per_meter),
        }
    }
}

fn positive_or(raw: Result<String, VarError>, default: f64) -> f64 {
    let Ok(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}
