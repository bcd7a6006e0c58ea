//! SVG backend for [`Surface`].
//!
//! Output is deterministic: the same draw calls always produce the same
//! document byte for byte. Coordinates are written with at most three
//! decimals, and the current transform is baked into each element as a
//! `matrix(...)` attribute.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::convert::Infallible;

use crate::render::{Font, Surface, TextAlign, TextBaseline};

/// Affine transform in canvas order: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    fn translated(self, x: f64, y: f64) -> Self {
        Self {
            e: self.a * x + self.c * y + self.e,
            f: self.b * x + self.d * y + self.f,
            ..self
        }
    }

    fn rotated(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: self.c * cos - self.a * sin,
            d: self.d * cos - self.b * sin,
            ..self
        }
    }
}

#[derive(Debug, Clone)]
struct State {
    stroke: String,
    fill: String,
    line_width: f64,
    dash: Vec<f64>,
    font: Font,
    align: TextAlign,
    baseline: TextBaseline,
    transform: Matrix,
}

impl Default for State {
    fn default() -> Self {
        Self {
            stroke: "#000".to_owned(),
            fill: "#000".to_owned(),
            line_width: 1.0,
            dash: Vec::new(),
            font: Font::regular(10.0),
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            transform: Matrix::IDENTITY,
        }
    }
}

/// Accumulates draw calls into an SVG document of a fixed pixel size.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
    state: State,
    stack: Vec<State>,
}

impl SvgSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, body: String::new(), state: State::default(), stack: Vec::new() }
    }

    /// Close the document and return it.
    #[must_use]
    pub fn finish(self) -> String {
        let w = num(self.width);
        let h = num(self.height);
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body
        )
    }

    fn transform_attr(&self) -> String {
        let m = self.state.transform;
        if m == Matrix::IDENTITY {
            return String::new();
        }
        format!(
            " transform=\"matrix({} {} {} {} {} {})\"",
            num(m.a),
            num(m.b),
            num(m.c),
            num(m.d),
            num(m.e),
            num(m.f)
        )
    }

    fn stroke_attrs(&self) -> String {
        let mut attrs = format!(
            " fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
            escape(&self.state.stroke),
            num(self.state.line_width)
        );
        if !self.state.dash.is_empty() {
            let dash: Vec<String> = self.state.dash.iter().map(|v| num(*v)).collect();
            attrs.push_str(&format!(" stroke-dasharray=\"{}\"", dash.join(" ")));
        }
        attrs
    }
}

impl Surface for SvgSurface {
    type Error = Infallible;

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.state.transform = self.state.transform.translated(x, y);
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), Infallible> {
        self.state.transform = self.state.transform.rotated(radians);
        Ok(())
    }

    /// SVG has no erase; paint the area white, which is what an export expects.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let element = format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#fff\"{}/>\n",
            num(x),
            num(y),
            num(width),
            num(height),
            self.transform_attr()
        );
        self.body.push_str(&element);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let element = format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}{}/>\n",
            num(x),
            num(y),
            num(width),
            num(height),
            self.stroke_attrs(),
            self.transform_attr()
        );
        self.body.push_str(&element);
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let element = format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}{}/>\n",
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            self.stroke_attrs(),
            self.transform_attr()
        );
        self.body.push_str(&element);
    }

    fn set_stroke_style(&mut self, color: &str) {
        color.clone_into(&mut self.state.stroke);
    }

    fn set_fill_style(&mut self, color: &str) {
        color.clone_into(&mut self.state.fill);
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Infallible> {
        segments.clone_into(&mut self.state.dash);
        Ok(())
    }

    fn set_font(&mut self, font: &Font) {
        self.state.font = *font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Infallible> {
        let font = self.state.font;
        let anchor = match self.state.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
        };
        let baseline = match self.state.baseline {
            TextBaseline::Alphabetic => "",
            TextBaseline::Middle => " dominant-baseline=\"central\"",
        };
        let weight = if font.bold { " font-weight=\"bold\"" } else { "" };
        let element = format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\"{weight} fill=\"{}\" text-anchor=\"{anchor}\"{baseline}{}>{}</text>\n",
            num(x),
            num(y),
            font.family.css_name(),
            num(font.size_px),
            escape(&self.state.fill),
            self.transform_attr(),
            escape(text)
        );
        self.body.push_str(&element);
        Ok(())
    }
}

/// Up to three decimals, trailing zeros trimmed, no negative zero.
fn num(value: f64) -> String {
    let fixed = format!("{value:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" { "0".to_owned() } else { trimmed.to_owned() }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
