//! Rendering: draws the floor plan onto a 2D drawing surface.
//!
//! The scene is described against [`Surface`], a small subset of the
//! canvas 2D context. Backends are [`crate::svg::SvgSurface`] (export and
//! tests) and, with the `web` feature, the browser canvas. Rendering only
//! reads the model and mapper.
//!
//! Draw order, later on top: field border, grid, field labels, then for each
//! item in insertion order its selection highlight, border, name, and
//! dimension annotations.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::FRAC_PI_2;

use crate::consts::{EXPORT_FOOTER_PX, EXPORT_MARGIN_PX, EXPORT_TITLE_PX};
use crate::mapper::{CoordinateMapper, Point};
use crate::model::{Field, Item, ItemId, LayoutModel};

const BORDER_COLOR: &str = "#000";
const GRID_COLOR: &str = "#e0e0e0";
const LABEL_COLOR: &str = "#333";
const ITEM_COLOR: &str = "#111";
const HIGHLIGHT_COLOR: &str = "#667eea";
const ANNOTATION_COLOR: &str = "#d32f2f";

const HIGHLIGHT_DASH_PX: [f64; 2] = [5.0, 5.0];
const HIGHLIGHT_WIDTH_PX: f64 = 3.0;
/// Gap between an item's border and its highlight outline.
const HIGHLIGHT_OUTSET_PX: f64 = 2.0;
const ITEM_LINE_WIDTH_PX: f64 = 1.2;
/// Distance of annotation labels from their dimension line.
const ANNOTATION_LABEL_OFFSET_PX: f64 = 8.0;
/// Extra area cleared around the field by the fast path; covers the
/// highlight outline of items touching the field edge.
const FAST_CLEAR_PAD_PX: f64 = 4.0;

const EXPORT_TITLE_FONT_PX: f64 = 24.0;
const EXPORT_FOOTER_FONT_PX: f64 = 14.0;
const EXPORT_FOOTER_LINE_PX: f64 = 20.0;

// =============================================================
// Surface
// =============================================================

/// Horizontal text anchoring, as in `CanvasRenderingContext2D.textAlign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Vertical text anchoring, as in `CanvasRenderingContext2D.textBaseline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Arial,
    SansSerif,
}

impl FontFamily {
    #[must_use]
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::SansSerif => "sans-serif",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size_px: f64,
    pub bold: bool,
    pub family: FontFamily,
}

impl Font {
    #[must_use]
    pub fn regular(size_px: f64) -> Self {
        Self { size_px, bold: false, family: FontFamily::SansSerif }
    }

    #[must_use]
    pub fn bold(size_px: f64, family: FontFamily) -> Self {
        Self { size_px, bold: true, family }
    }

    /// CSS shorthand, e.g. `bold 15px Arial`.
    #[must_use]
    pub fn css(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{weight}{}px {}", self.size_px, self.family.css_name())
    }
}

/// A 2D drawing target with canvas-like state (styles and transform saved
/// and restored as a stack).
pub trait Surface {
    type Error;

    fn save(&mut self);
    fn restore(&mut self);

    /// # Errors
    ///
    /// Backend-specific.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Backend-specific.
    fn rotate(&mut self, radians: f64) -> Result<(), Self::Error>;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);

    /// # Errors
    ///
    /// Backend-specific.
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Self::Error>;

    fn set_font(&mut self, font: &Font);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// # Errors
    ///
    /// Backend-specific.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
}

// =============================================================
// Entry points
// =============================================================

/// Draw the full scene, highlighting the model's active item.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn draw<S: Surface>(surface: &mut S, model: &LayoutModel, mapper: &CoordinateMapper) -> Result<(), S::Error> {
    let (width, height) = mapper.surface_size_px(model.field());
    surface.clear_rect(0.0, 0.0, width, height);
    draw_scene(surface, model, mapper, model.active())
}

/// Redraw only the field region: border, grid, and items. Labels in the
/// margin are left untouched. Used for frames during drags and edits.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn draw_fast<S: Surface>(surface: &mut S, model: &LayoutModel, mapper: &CoordinateMapper) -> Result<(), S::Error> {
    let field = model.field();
    let (fw, fh) = mapper.field_size_px(field);
    surface.clear_rect(
        mapper.margin - FAST_CLEAR_PAD_PX,
        mapper.margin - FAST_CLEAR_PAD_PX,
        fw + 2.0 * FAST_CLEAR_PAD_PX,
        fh + 2.0 * FAST_CLEAR_PAD_PX,
    );
    draw_border(surface, field, mapper)?;
    draw_grid(surface, field, mapper);
    draw_items(surface, model, mapper, model.active())
}

/// Mapper used for export images at `px_per_meter`.
#[must_use]
pub fn export_mapper(px_per_meter: f64) -> CoordinateMapper {
    CoordinateMapper::new(px_per_meter, EXPORT_MARGIN_PX)
}

/// Pixel size of the export image for `field`: the scene plus title band and footer.
#[must_use]
pub fn export_size(field: Field, px_per_meter: f64) -> (f64, f64) {
    let (width, height) = export_mapper(px_per_meter).surface_size_px(field);
    (width, height + EXPORT_TITLE_PX + EXPORT_FOOTER_PX)
}

/// Draw the export image: title, the scene without selection highlight, and
/// a metrics footer (field size, occupied bounds, item count).
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn draw_export<S: Surface>(
    surface: &mut S,
    model: &LayoutModel,
    px_per_meter: f64,
    title: &str,
) -> Result<(), S::Error> {
    let field = model.field();
    let mapper = export_mapper(px_per_meter);
    let (width, height) = export_size(field, px_per_meter);
    surface.clear_rect(0.0, 0.0, width, height);

    surface.save();
    surface.set_fill_style(LABEL_COLOR);
    surface.set_font(&Font::bold(EXPORT_TITLE_FONT_PX, FontFamily::Arial));
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.fill_text(title, width / 2.0, EXPORT_TITLE_PX / 2.0)?;
    surface.restore();

    surface.save();
    surface.translate(0.0, EXPORT_TITLE_PX)?;
    draw_scene(surface, model, &mapper, None)?;
    surface.restore();

    let (_, scene_height) = mapper.surface_size_px(field);
    let footer_top = EXPORT_TITLE_PX + scene_height;
    surface.save();
    surface.set_fill_style(LABEL_COLOR);
    surface.set_font(&Font::regular(EXPORT_FOOTER_FONT_PX));
    surface.set_text_align(TextAlign::Left);
    surface.set_text_baseline(TextBaseline::Middle);
    let mut baseline = footer_top;
    for line in footer_lines(model) {
        baseline += EXPORT_FOOTER_LINE_PX;
        surface.fill_text(&line, EXPORT_MARGIN_PX, baseline)?;
    }
    surface.restore();
    Ok(())
}

/// Footer text of the export image, one entry per line.
#[must_use]
pub fn footer_lines(model: &LayoutModel) -> Vec<String> {
    let field = model.field();
    let occupied = match model.occupied_bounds() {
        Some(b) => format!("{} x {}", format_meters(b.width), format_meters(b.height)),
        None => "none".to_owned(),
    };
    vec![
        format!("Field: {} x {}", format_meters(field.width), format_meters(field.height)),
        format!("Occupied: {occupied}"),
        format!("Items: {}", model.len()),
    ]
}

/// A length label: at most two decimals, trailing zeros dropped, `m` suffix.
#[must_use]
pub fn format_meters(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{trimmed}m")
}

// =============================================================
// Scene
// =============================================================

fn draw_scene<S: Surface>(
    surface: &mut S,
    model: &LayoutModel,
    mapper: &CoordinateMapper,
    highlight: Option<ItemId>,
) -> Result<(), S::Error> {
    let field = model.field();
    draw_border(surface, field, mapper)?;
    draw_grid(surface, field, mapper);
    draw_field_labels(surface, field, mapper)?;
    draw_items(surface, model, mapper, highlight)
}

fn draw_border<S: Surface>(surface: &mut S, field: Field, mapper: &CoordinateMapper) -> Result<(), S::Error> {
    let (fw, fh) = mapper.field_size_px(field);
    surface.save();
    surface.set_stroke_style(BORDER_COLOR);
    surface.set_line_width((mapper.scale / 10.0).max(2.0));
    surface.set_line_dash(&[])?;
    surface.stroke_rect(mapper.margin, mapper.margin, fw, fh);
    surface.restore();
    Ok(())
}

/// One line per whole meter, including both edges when the side is integral.
fn draw_grid<S: Surface>(surface: &mut S, field: Field, mapper: &CoordinateMapper) {
    let (fw, fh) = mapper.field_size_px(field);
    let m = mapper.margin;
    surface.save();
    surface.set_stroke_style(GRID_COLOR);
    surface.set_line_width((mapper.scale / 30.0).max(1.0));

    let mut x = 0.0;
    while x <= field.width {
        let px = m + mapper.len_to_screen(x);
        surface.stroke_line(px, m, px, m + fh);
        x += 1.0;
    }
    let mut y = 0.0;
    while y <= field.height {
        let py = m + mapper.len_to_screen(y);
        surface.stroke_line(m, py, m + fw, py);
        y += 1.0;
    }
    surface.restore();
}

fn draw_field_labels<S: Surface>(surface: &mut S, field: Field, mapper: &CoordinateMapper) -> Result<(), S::Error> {
    let (fw, fh) = mapper.field_size_px(field);
    let m = mapper.margin;
    let scale = mapper.scale;
    let width_label = format_meters(field.width);
    let height_label = format_meters(field.height);

    surface.save();
    surface.set_fill_style(LABEL_COLOR);
    surface.set_font(&Font::bold((scale / 2.0).max(12.0), FontFamily::Arial));
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Alphabetic);

    surface.fill_text(&width_label, m + fw / 2.0, (scale / 2.0).max(20.0))?;
    surface.fill_text(&width_label, m + fw / 2.0, m + fh + (scale / 2.0).max(15.0))?;

    let side_offset = (scale / 2.0).max(20.0);
    for x in [side_offset, m + fw + side_offset] {
        surface.save();
        surface.translate(x, m + fh / 2.0)?;
        surface.rotate(-FRAC_PI_2)?;
        surface.fill_text(&height_label, 0.0, 0.0)?;
        surface.restore();
    }

    surface.restore();
    Ok(())
}

fn draw_items<S: Surface>(
    surface: &mut S,
    model: &LayoutModel,
    mapper: &CoordinateMapper,
    highlight: Option<ItemId>,
) -> Result<(), S::Error> {
    for item in model.items() {
        draw_item(surface, item, mapper, highlight == Some(item.id))?;
    }
    Ok(())
}

fn draw_item<S: Surface>(
    surface: &mut S,
    item: &Item,
    mapper: &CoordinateMapper,
    highlighted: bool,
) -> Result<(), S::Error> {
    let Point { x, y } = mapper.to_screen(Point::new(item.x, item.y));
    let w = mapper.len_to_screen(item.width);
    let h = mapper.len_to_screen(item.height);
    let scale = mapper.scale;

    if highlighted {
        surface.save();
        surface.set_stroke_style(HIGHLIGHT_COLOR);
        surface.set_line_width(HIGHLIGHT_WIDTH_PX);
        surface.set_line_dash(&HIGHLIGHT_DASH_PX)?;
        surface.stroke_rect(
            x - HIGHLIGHT_OUTSET_PX,
            y - HIGHLIGHT_OUTSET_PX,
            w + 2.0 * HIGHLIGHT_OUTSET_PX,
            h + 2.0 * HIGHLIGHT_OUTSET_PX,
        );
        surface.restore();
    }

    surface.save();
    surface.set_stroke_style(ITEM_COLOR);
    surface.set_line_width(ITEM_LINE_WIDTH_PX);
    surface.set_line_dash(&[])?;
    surface.stroke_rect(x, y, w, h);
    surface.restore();

    surface.save();
    surface.set_fill_style(ITEM_COLOR);
    surface.set_font(&Font::regular((scale / 1.5).max(16.0)));
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.fill_text(&item.name, x + w / 2.0, y + h / 2.0)?;
    surface.restore();

    draw_annotations(surface, item, x, y, w, h, scale)
}

/// Width along the top edge and height along the left edge, both inset.
fn draw_annotations<S: Surface>(
    surface: &mut S,
    item: &Item,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    scale: f64,
) -> Result<(), S::Error> {
    let pad = (scale / 8.0).max(8.0);

    surface.save();
    surface.set_stroke_style(ANNOTATION_COLOR);
    surface.set_fill_style(ANNOTATION_COLOR);
    surface.set_line_width(1.0);
    surface.set_font(&Font::regular((scale / 4.0).max(10.0)));
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);

    surface.stroke_line(x + pad, y + pad, x + w - pad, y + pad);
    surface.fill_text(&format_meters(item.width), x + w / 2.0, y + pad + ANNOTATION_LABEL_OFFSET_PX)?;

    surface.stroke_line(x + pad, y + pad, x + pad, y + h - pad);
    surface.save();
    surface.translate(x + pad + ANNOTATION_LABEL_OFFSET_PX, y + h / 2.0)?;
    surface.rotate(-FRAC_PI_2)?;
    surface.fill_text(&format_meters(item.height), 0.0, 0.0)?;
    surface.restore();

    surface.restore();
    Ok(())
}
