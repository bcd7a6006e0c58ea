//! Interaction controller: turns pointer, touch, and keyboard input into model
//! mutations and tells the host what to redraw.
//!
//! The host owns the timer and the event loop. It forwards raw events with a
//! millisecond timestamp, calls [`EngineCore::tick`] while a press is held,
//! and acts on the returned [`Action`]s (refresh lists, show messages,
//! redraw). Nothing here blocks or schedules work.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::config::EditorConfig;
use crate::error::{ErrorCode, LayoutError};
use crate::frame_gate::FrameGate;
use crate::hit;
use crate::input::{Button, InputState, Key, Mode, PendingPress, UiState};
use crate::mapper::{CoordinateMapper, Point};
use crate::model::{Dimension, Field, Item, ItemId, ItemKind, LayoutModel, MoveOutcome, parse_dimension};
use crate::palette::{Palette, Template};

/// Confirmation collaborator for destructive actions.
pub trait Prompter {
    /// Ask the user to confirm `message`. `true` proceeds.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Reports the space available to the render surface, in pixels.
pub trait ContainerSize {
    fn container_size(&self) -> (f64, f64);
}

/// How much of the surface needs repainting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderScope {
    /// Border, grid, labels, and items.
    Full,
    /// Only the field region: grid and items.
    Items,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ItemPlaced(Item),
    /// An item's position, size, name, or overlap flag changed (or was
    /// restored after a rejected edit); the host should re-sync its view of it.
    ItemUpdated(Item),
    ItemDeleted { id: ItemId },
    LayoutCleared,
    SelectionChanged(Option<ItemId>),
    /// A user-initiated action was refused; `message` is for display.
    Rejected { code: &'static str, message: String },
    RenderNeeded(RenderScope),
}

/// Core controller state. Independent of any browser API so it can be tested natively.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub model: LayoutModel,
    pub mapper: CoordinateMapper,
    pub palette: Palette,
    pub ui: UiState,
    pub input: InputState,
    pub config: EditorConfig,
    pub frame_gate: FrameGate,
    pub container_width: f64,
    pub container_height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let field = Field::new(config.field_width, config.field_height).unwrap_or_default();
        Self {
            model: LayoutModel::new(field),
            mapper: CoordinateMapper::new(crate::consts::DEFAULT_SCALE_PX_PER_M, config.margin_px),
            palette: Palette::default(),
            ui: UiState::default(),
            input: InputState::default(),
            frame_gate: FrameGate::new(config.frame_interval_ms),
            config,
            container_width: 0.0,
            container_height: 0.0,
        }
    }

    // --- Viewport ---

    /// Record the container size and refit the mapper to it.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.container_width = width;
        self.container_height = height;
        self.refit();
        vec![Action::RenderNeeded(RenderScope::Full)]
    }

    /// Pull the container size from the host's provider.
    pub fn sync_viewport(&mut self, provider: &impl ContainerSize) -> Vec<Action> {
        let (w, h) = provider.container_size();
        self.set_viewport(w, h)
    }

    /// Pixel size the render surface should have: field plus margins.
    #[must_use]
    pub fn surface_size(&self) -> (f64, f64) {
        self.mapper.surface_size_px(self.model.field())
    }

    fn refit(&mut self) {
        let field = self.model.field();
        self.mapper.fit(self.container_width, self.container_height, field);
    }

    // --- Field ---

    /// Resize the field. Items are left where they are.
    pub fn resize_field(&mut self, width: f64, height: f64) -> Vec<Action> {
        match self.model.resize_field(width, height) {
            Ok(()) => {
                self.refit();
                vec![Action::RenderNeeded(RenderScope::Full)]
            }
            Err(e) => vec![Action::Rejected {
                code: e.error_code(),
                message: "Field dimensions must be positive numbers".to_owned(),
            }],
        }
    }

    // --- Palette ---

    /// Arm placement with the palette's template for `kind`.
    pub fn select_kind(&mut self, kind: ItemKind) {
        self.ui.palette = self.palette.template(kind).cloned();
    }

    /// Arm placement with an explicit template (host-supplied size).
    pub fn select_template(&mut self, template: Template) {
        self.ui.palette = Some(template);
    }

    pub fn clear_palette(&mut self) {
        self.ui.palette = None;
    }

    /// The explicit "add" button: place the palette selection at the default
    /// spot. The template stays armed for repeated adds.
    pub fn add_from_palette(&mut self) -> Vec<Action> {
        let Some(template) = self.ui.palette.clone() else {
            return vec![Action::Rejected {
                code: "E_NO_TEMPLATE",
                message: "Select a machine type first".to_owned(),
            }];
        };
        match self.model.add_item(&template) {
            Ok(item) => vec![Action::ItemPlaced(item), Action::RenderNeeded(RenderScope::Full)],
            Err(e) => vec![rejected(&e, "That position overlaps another item; cannot place here")],
        }
    }

    // --- Pointer input ---

    /// Pointer-down (mouse press or touch start) at `screen_pt`.
    ///
    /// Over an item: select it and start a drag with a long-press timer.
    /// Elsewhere: clear the active selection and, when a template is armed
    /// and the point is inside the field, try to place it there.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }

        if let Some(id) = hit::hit_test(screen_pt, &self.model, &self.mapper) {
            return self.begin_drag(id, screen_pt, now_ms);
        }

        let mut actions = Vec::new();
        if self.model.active().is_some() {
            self.model.clear_selection();
            actions.push(Action::SelectionChanged(None));
        }

        if hit::in_field(screen_pt, &self.model, &self.mapper) {
            if let Some(template) = self.ui.palette.take() {
                let position = self.mapper.to_field(screen_pt);
                match self.model.place_item(&template, position) {
                    Ok(item) => {
                        actions.push(Action::ItemPlaced(item));
                        actions.push(Action::RenderNeeded(RenderScope::Full));
                        return actions;
                    }
                    Err(e) => {
                        actions.push(rejected(&e, "That position overlaps another item; cannot place here"));
                    }
                }
            }
        }

        if !actions.is_empty() {
            actions.push(Action::RenderNeeded(RenderScope::Items));
        }
        actions
    }

    fn begin_drag(&mut self, id: ItemId, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        let Some(item) = self.model.get(id) else {
            return Vec::new();
        };
        let corner = self.mapper.to_screen(Point::new(item.x, item.y));
        let grab_offset = Point::new(screen_pt.x - corner.x, screen_pt.y - corner.y);
        if self.model.select(id).is_err() {
            return Vec::new();
        }
        self.input = InputState::Dragging {
            id,
            grab_offset,
            press: Some(PendingPress { started_ms: now_ms, origin: screen_pt }),
        };
        self.frame_gate.reset();
        debug!(id, "drag started");
        vec![Action::SelectionChanged(Some(id)), Action::RenderNeeded(RenderScope::Items)]
    }

    /// Pointer motion. Only meaningful while dragging.
    ///
    /// Every move is applied to the model; the redraw request is throttled by
    /// the frame gate. Moves that would collide are dropped silently.
    pub fn on_pointer_move(&mut self, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        let InputState::Dragging { id, grab_offset, press } = &mut self.input else {
            return Vec::new();
        };
        let (id, grab_offset) = (*id, *grab_offset);

        if let Some(p) = *press {
            if screen_pt.distance(p.origin) <= self.config.drag_tolerance_px {
                return Vec::new();
            }
            // Real motion: this is a drag, not a long-press.
            *press = None;
        }

        let corner = Point::new(screen_pt.x - grab_offset.x, screen_pt.y - grab_offset.y);
        let target = self.mapper.to_field(corner);
        match self.model.move_item(id, target) {
            Ok(MoveOutcome::Moved(_)) => {
                let mut actions = Vec::new();
                if let Some(item) = self.model.get(id) {
                    actions.push(Action::ItemUpdated(item.clone()));
                }
                if self.frame_gate.admit(now_ms) {
                    actions.push(Action::RenderNeeded(RenderScope::Items));
                }
                actions
            }
            Ok(MoveOutcome::Blocked) => Vec::new(),
            Err(_) => {
                self.input = InputState::Idle;
                Vec::new()
            }
        }
    }

    /// Pointer release. Ends any drag; the position is already committed.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if let InputState::Dragging { id, .. } = self.input {
            debug!(id, "drag ended");
            self.input = InputState::Idle;
            self.frame_gate.reset();
            // Flush whatever the gate held back.
            return vec![Action::RenderNeeded(RenderScope::Items)];
        }
        Vec::new()
    }

    /// Advance the long-press timer.
    ///
    /// Once a press has been held for the configured delay without moving,
    /// the drag is abandoned and the user is asked whether to delete the item.
    pub fn tick(&mut self, now_ms: f64, prompter: &mut dyn Prompter) -> Vec<Action> {
        let InputState::Dragging { id, press: Some(press), .. } = self.input else {
            return Vec::new();
        };
        if now_ms - press.started_ms < self.config.long_press_ms {
            return Vec::new();
        }
        self.input = InputState::Idle;

        let Some(item) = self.model.get(id) else {
            return Vec::new();
        };
        let message = format!("Delete {} {}?", item.name, item.id);
        if !prompter.confirm(&message) {
            return Vec::new();
        }
        self.delete(id)
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if !key.is_delete() {
            return Vec::new();
        }
        match self.model.active() {
            Some(id) => self.delete(id),
            None => Vec::new(),
        }
    }

    // --- Item edits from list UI ---

    /// Live keystroke in a size field. Invalid or colliding input changes
    /// nothing and raises no message.
    pub fn on_size_input(&mut self, id: ItemId, dimension: Dimension, raw: &str) -> Vec<Action> {
        let Some(value) = parse_dimension(raw) else {
            return Vec::new();
        };
        match self.model.resize_item(id, dimension, value) {
            Ok(()) => self.updated(id, RenderScope::Items),
            // Re-sync the input box with the reverted value.
            Err(LayoutError::Collision { .. }) => self.item_update(id).into_iter().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Size field lost focus: clamp, round, and apply with collision feedback.
    pub fn on_size_commit(&mut self, id: ItemId, dimension: Dimension, raw: &str) -> Vec<Action> {
        match self.model.commit_item_size(id, dimension, raw) {
            Ok(_) => self.updated(id, RenderScope::Items),
            Err(e) => {
                let mut actions: Vec<Action> = self.item_update(id).into_iter().collect();
                actions.push(rejected(&e, "The new size would overlap another item; previous value restored"));
                actions
            }
        }
    }

    pub fn set_overlap_allowed(&mut self, id: ItemId, allowed: bool) -> Vec<Action> {
        match self.model.set_overlap_allowed(id, allowed) {
            Ok(()) => self.updated(id, RenderScope::Items),
            Err(_) => Vec::new(),
        }
    }

    pub fn rename(&mut self, id: ItemId, name: &str) -> Vec<Action> {
        match self.model.rename_item(id, name) {
            Ok(()) => self.updated(id, RenderScope::Items),
            Err(_) => Vec::new(),
        }
    }

    /// Delete item `id` (list button, delete key, or confirmed long-press).
    pub fn delete(&mut self, id: ItemId) -> Vec<Action> {
        let was_active = self.model.active() == Some(id);
        if self.model.delete_item(id).is_err() {
            return Vec::new();
        }
        if matches!(self.input, InputState::Dragging { id: dragged, .. } if dragged == id) {
            self.input = InputState::Idle;
        }
        let mut actions = vec![Action::ItemDeleted { id }];
        if was_active {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded(RenderScope::Full));
        actions
    }

    /// Remove everything after confirmation. Also drops both selections.
    pub fn clear_all(&mut self, prompter: &mut dyn Prompter) -> Vec<Action> {
        if !prompter.confirm("Clear the whole layout?") {
            return Vec::new();
        }
        self.model.clear();
        self.ui.palette = None;
        self.input = InputState::Idle;
        vec![
            Action::LayoutCleared,
            Action::SelectionChanged(None),
            Action::RenderNeeded(RenderScope::Full),
        ]
    }

    // --- Queries ---

    /// Current controller mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.input.mode(&self.ui)
    }

    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.model.active()
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.model.items()
    }

    #[must_use]
    pub fn field(&self) -> Field {
        self.model.field()
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.model.get(id)
    }

    // --- Helpers ---

    fn item_update(&self, id: ItemId) -> Option<Action> {
        self.model.get(id).map(|item| Action::ItemUpdated(item.clone()))
    }

    fn updated(&self, id: ItemId, scope: RenderScope) -> Vec<Action> {
        let mut actions: Vec<Action> = self.item_update(id).into_iter().collect();
        actions.push(Action::RenderNeeded(scope));
        actions
    }
}

fn rejected(error: &LayoutError, collision_message: &str) -> Action {
    let message = match error {
        LayoutError::Collision { .. } => collision_message.to_owned(),
        other => other.to_string(),
    };
    Action::Rejected { code: error.error_code(), message }
}
