use super::*;
use crate::mapper::{CoordinateMapper, Point};
use crate::model::{Field, ItemKind, LayoutModel};
use crate::palette::Template;
use crate::render::{self, FontFamily};

fn render_model(model: &LayoutModel) -> String {
    let mapper = CoordinateMapper::new(30.0, 40.0);
    let (w, h) = mapper.surface_size_px(model.field());
    let mut svg = SvgSurface::new(w, h);
    let Ok(()) = render::draw(&mut svg, model, &mapper);
    svg.finish()
}

// =============================================================
// Number formatting and escaping
// =============================================================

#[test]
fn num_trims_trailing_zeros() {
    assert_eq!(num(40.0), "40");
    assert_eq!(num(1.5), "1.5");
    assert_eq!(num(2.0 / 3.0), "0.667");
}

#[test]
fn num_has_no_negative_zero() {
    assert_eq!(num(-0.0), "0");
    assert_eq!(num(-0.0001), "0");
}

#[test]
fn escape_xml_specials() {
    assert_eq!(escape("A&B <\"x\">"), "A&amp;B &lt;&quot;x&quot;&gt;");
}

// =============================================================
// Elements
// =============================================================

#[test]
fn empty_surface_is_valid_document() {
    let svg = SvgSurface::new(100.0, 50.0).finish();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\""));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn stroke_rect_uses_current_style() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    svg.set_stroke_style("#111");
    svg.set_line_width(1.2);
    svg.stroke_rect(10.0, 20.0, 30.0, 40.0);
    let out = svg.finish();
    assert!(out.contains(
        "<rect x=\"10\" y=\"20\" width=\"30\" height=\"40\" fill=\"none\" stroke=\"#111\" stroke-width=\"1.2\"/>"
    ));
}

#[test]
fn dash_is_emitted_and_restored() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    svg.save();
    let Ok(()) = svg.set_line_dash(&[5.0, 5.0]);
    svg.stroke_line(0.0, 0.0, 10.0, 0.0);
    svg.restore();
    svg.stroke_line(0.0, 0.0, 10.0, 0.0);
    let out = svg.finish();
    assert_eq!(out.matches("stroke-dasharray=\"5 5\"").count(), 1);
}

#[test]
fn translate_becomes_matrix_attribute() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    let Ok(()) = svg.translate(20.0, 30.0);
    svg.clear_rect(0.0, 0.0, 5.0, 5.0);
    let out = svg.finish();
    assert!(out.contains("transform=\"matrix(1 0 0 1 20 30)\""));
}

#[test]
fn rotated_text_carries_rotation() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    svg.save();
    let Ok(()) = svg.translate(20.0, 265.0);
    let Ok(()) = svg.rotate(-std::f64::consts::FRAC_PI_2);
    let Ok(()) = svg.fill_text("15m", 0.0, 0.0);
    svg.restore();
    let Ok(()) = svg.fill_text("plain", 1.0, 2.0);
    let out = svg.finish();
    assert!(out.contains("transform=\"matrix(0 -1 1 0 20 265)\">15m</text>"));
    assert!(out.contains("text-anchor=\"start\">plain</text>"));
}

#[test]
fn text_font_and_alignment() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    svg.set_font(&Font::bold(15.0, FontFamily::Arial));
    svg.set_fill_style("#333");
    svg.set_text_align(TextAlign::Center);
    svg.set_text_baseline(TextBaseline::Middle);
    let Ok(()) = svg.fill_text("A & B", 50.0, 10.0);
    let out = svg.finish();
    assert!(out.contains(
        "<text x=\"50\" y=\"10\" font-family=\"Arial\" font-size=\"15\" font-weight=\"bold\" fill=\"#333\" text-anchor=\"middle\" dominant-baseline=\"central\">A &amp; B</text>"
    ));
}

// =============================================================
// Scenes
// =============================================================

#[test]
fn rendering_twice_is_byte_identical() {
    let mut model = LayoutModel::new(Field { width: 10.0, height: 8.0 });
    assert!(model.place_item(&Template::new(ItemKind::Cnc, 2.0, 1.5), Point::new(1.0, 1.0)).is_ok());
    assert!(model.select(1).is_ok());
    assert_eq!(render_model(&model), render_model(&model));
}

#[test]
fn rendered_scene_contains_item_name_and_size() {
    let mut model = LayoutModel::new(Field { width: 10.0, height: 8.0 });
    assert!(model.place_item(&Template::new(ItemKind::Cnc, 2.0, 1.5), Point::new(1.0, 1.0)).is_ok());
    let out = render_model(&model);
    assert!(out.contains(">CNC Machine</text>"));
    assert!(out.contains(">2m</text>"));
    assert!(out.contains(">1.5m</text>"));
}
