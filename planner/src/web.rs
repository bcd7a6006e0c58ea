//! Browser binding: the canvas 2D context as a [`Surface`], and an
//! [`Engine`] that owns a canvas element and forwards input to [`EngineCore`].

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::EditorConfig;
use crate::engine::{Action, ContainerSize, EngineCore, Prompter, RenderScope};
use crate::input::{Button, Key};
use crate::mapper::Point;
use crate::model::{Dimension, Field, Item, ItemId, ItemKind};
use crate::render::{self, Font, Surface, TextAlign, TextBaseline};

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::rotate(self, radians)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, width, height);
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), JsValue> {
        let dash = segments.iter().map(|v| JsValue::from_f64(*v)).collect::<js_sys::Array>();
        CanvasRenderingContext2d::set_line_dash(self, &dash)
    }

    fn set_font(&mut self, font: &Font) {
        CanvasRenderingContext2d::set_font(self, &font.css());
    }

    fn set_text_align(&mut self, align: TextAlign) {
        CanvasRenderingContext2d::set_text_align(
            self,
            match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
            },
        );
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        CanvasRenderingContext2d::set_text_baseline(
            self,
            match baseline {
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Middle => "middle",
            },
        );
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)
    }
}

/// `window.confirm` as the confirmation collaborator.
pub struct BrowserPrompt;

impl Prompter for BrowserPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        match window.confirm_with_message(message) {
            Ok(answer) => answer,
            Err(_) => false,
        }
    }
}

/// The browser window's inner size as the available container.
pub struct WindowContainer;

impl ContainerSize for WindowContainer {
    fn container_size(&self) -> (f64, f64) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let read = |value: Result<JsValue, JsValue>| match value {
            Ok(v) => v.as_f64().unwrap_or(0.0),
            Err(_) => 0.0,
        };
        (read(window.inner_width()), read(window.inner_height()))
    }
}

/// The full editor engine. Wraps `EngineCore` and owns the canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: EditorConfig) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, dpr: 1.0, core: EngineCore::new(config) })
    }

    // --- Viewport ---

    /// Fit the field into a `width_css` x `height_css` container and resize
    /// the canvas backing store for `dpr`.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.dpr = dpr;
        let actions = self.core.set_viewport(width_css, height_css);
        self.resize_canvas();
        actions
    }

    fn resize_canvas(&self) {
        let (w, h) = self.core.surface_size();
        self.canvas.set_width(device_px(w, self.dpr));
        self.canvas.set_height(device_px(h, self.dpr));
    }

    pub fn resize_field(&mut self, width: f64, height: f64) -> Vec<Action> {
        let actions = self.core.resize_field(width, height);
        self.resize_canvas();
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, now_ms)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, now_ms)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    /// Call from a host timer while a pointer is held down.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.core.tick(now_ms, &mut BrowserPrompt)
    }

    // --- Delegated edits ---

    pub fn select_kind(&mut self, kind: ItemKind) {
        self.core.select_kind(kind);
    }

    pub fn add_from_palette(&mut self) -> Vec<Action> {
        self.core.add_from_palette()
    }

    pub fn on_size_input(&mut self, id: ItemId, dimension: Dimension, raw: &str) -> Vec<Action> {
        self.core.on_size_input(id, dimension, raw)
    }

    pub fn on_size_commit(&mut self, id: ItemId, dimension: Dimension, raw: &str) -> Vec<Action> {
        self.core.on_size_commit(id, dimension, raw)
    }

    pub fn delete(&mut self, id: ItemId) -> Vec<Action> {
        self.core.delete(id)
    }

    pub fn clear_all(&mut self) -> Vec<Action> {
        self.core.clear_all(&mut BrowserPrompt)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self, scope: RenderScope) -> Result<(), JsValue> {
        self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        match scope {
            RenderScope::Full => render::draw(&mut self.ctx, &self.core.model, &self.core.mapper),
            RenderScope::Items => render::draw_fast(&mut self.ctx, &self.core.model, &self.core.mapper),
        }
    }

    /// Perform any render requests in `actions` (at most one, the widest
    /// scope) and return the remaining actions for the page to handle.
    ///
    /// # Errors
    ///
    /// Returns `Err` if rendering fails.
    pub fn process(&mut self, actions: Vec<Action>) -> Result<Vec<Action>, JsValue> {
        let mut scope = None;
        let mut rest = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                Action::RenderNeeded(RenderScope::Full) => scope = Some(RenderScope::Full),
                Action::RenderNeeded(RenderScope::Items) => {
                    scope = scope.or(Some(RenderScope::Items));
                }
                other => rest.push(other),
            }
        }
        if let Some(scope) = scope {
            self.render(scope)?;
        }
        Ok(rest)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.core.selection()
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.core.items()
    }

    #[must_use]
    pub fn field(&self) -> Field {
        self.core.field()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_px(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().clamp(0.0, f64::from(u32::MAX)) as u32
}
