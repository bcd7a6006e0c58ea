//! Redraw throttling for continuous gestures.
//!
//! The gate only decides whether a *visual* refresh is due. Model mutations
//! never pass through it, so a skipped frame loses nothing but pixels; the
//! next frame that does render shows the latest state.

#[cfg(test)]
#[path = "frame_gate_test.rs"]
mod frame_gate_test;

use crate::consts::FRAME_INTERVAL_MS;

/// Tracks the last rendered timestamp and admits at most one frame per interval.
#[derive(Debug, Clone, Copy)]
pub struct FrameGate {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_MS)
    }
}

impl FrameGate {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_ms: None }
    }

    /// Returns `true` and records `now_ms` if a frame may render now.
    ///
    /// A clock that goes backwards (host timer reset) always admits.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        let due = match self.last_ms {
            None => true,
            Some(last) => now_ms < last || now_ms - last >= self.interval_ms,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    /// Forget the last frame so the next call admits unconditionally.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
