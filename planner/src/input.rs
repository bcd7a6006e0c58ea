//! Input model: buttons, keys, UI selection, and the gesture state machine.
//!
//! `UiState` holds the transient palette selection. `InputState` is the
//! gesture being tracked between pointer-down and pointer-up. The
//! placing-from-template mode is not stored separately: it is simply an idle
//! gesture state with a palette selection present (see [`Mode`]).

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::mapper::Point;
use crate::model::ItemId;
use crate::palette::Template;

/// Pointer button identifier. Touch contacts report as `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Keys that delete the active item.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }
}

/// Transient UI selection, not persisted.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Template chosen in the palette, waiting to be placed.
    pub palette: Option<Template>,
}

/// A press on an item that may still turn into a long-press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPress {
    /// Host timestamp of pointer-down, in milliseconds.
    pub started_ms: f64,
    /// Screen position of pointer-down.
    pub origin: Point,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user pressed an item and is (or may start) dragging it.
    Dragging {
        /// Item being dragged; also the active selection.
        id: ItemId,
        /// Pointer offset from the item's top-left corner, in screen pixels.
        grab_offset: Point,
        /// Long-press timer; `None` once motion has cancelled it.
        press: Option<PendingPress>,
    },
}

/// The controller's externally visible mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    PlacingFromTemplate,
    Dragging,
}

impl InputState {
    /// Combine gesture and palette state into the controller mode.
    #[must_use]
    pub fn mode(&self, ui: &UiState) -> Mode {
        match self {
            Self::Dragging { .. } => Mode::Dragging,
            Self::Idle if ui.palette.is_some() => Mode::PlacingFromTemplate,
            Self::Idle => Mode::Idle,
        }
    }
}
