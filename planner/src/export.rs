//! Layout export: the JSON snapshot file and rendered images.
//!
//! The JSON format is the editor's save file. `machines` carries every item
//! with its kind under `machineType` and a constant `"type": "machine"` tag;
//! the extended variant adds `actualDimensions`. Images are produced by
//! drawing the export composition onto an [`SvgSurface`], optionally
//! rasterized to PNG.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::path::Path;
use std::sync::Arc;

use resvg::{tiny_skia, usvg};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::error::ExportError;
use crate::model::{Field, Item, LayoutModel, OccupiedBounds};
use crate::render;
use crate::svg::SvgSurface;

/// Title baked into exported images.
pub const DEFAULT_TITLE: &str = "Factory Floor Layout";

/// Record discriminator in the `machines` array. Only machines exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    #[default]
    Machine,
}

/// One entry of `machines`: the item's fields plus the record tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRecord {
    #[serde(flatten)]
    pub item: Item,
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
}

/// The export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub field: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_dimensions: Option<OccupiedBounds>,
    pub machines: Vec<MachineRecord>,
    /// RFC 3339 UTC timestamp.
    #[serde(default)]
    pub export_time: String,
}

impl LayoutSnapshot {
    /// Snapshot `model` as of `at`, without `actualDimensions`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Time`] if `at` cannot be formatted.
    pub fn capture(model: &LayoutModel, at: OffsetDateTime) -> Result<Self, ExportError> {
        Ok(Self {
            field: model.field(),
            actual_dimensions: None,
            machines: model
                .items()
                .iter()
                .map(|item| MachineRecord { item: item.clone(), record_type: RecordType::Machine })
                .collect(),
            export_time: at.format(&Rfc3339)?,
        })
    }

    /// Snapshot including the occupied bounding box (omitted when empty).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Time`] if `at` cannot be formatted.
    pub fn capture_extended(model: &LayoutModel, at: OffsetDateTime) -> Result<Self, ExportError> {
        let mut snapshot = Self::capture(model, at)?;
        snapshot.actual_dimensions = model.occupied_bounds();
        Ok(snapshot)
    }

    /// Pretty-printed JSON with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Json`] on serialization failure.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an export file. The field must have positive finite sides;
    /// items are accepted as written.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Json`] for malformed JSON or missing keys.
    /// - [`ExportError::Layout`] for an unusable field.
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let snapshot: Self = serde_json::from_str(json)?;
        Field::new(snapshot.field.width, snapshot.field.height)?;
        Ok(snapshot)
    }

    /// Rebuild an editable model. See [`LayoutModel::restore`].
    #[must_use]
    pub fn into_model(self) -> LayoutModel {
        let items = self.machines.into_iter().map(|record| record.item).collect();
        LayoutModel::restore(self.field, items)
    }
}

impl LayoutModel {
    /// Import a previously exported layout.
    #[must_use]
    pub fn from_snapshot(snapshot: LayoutSnapshot) -> Self {
        snapshot.into_model()
    }
}

// =============================================================
// Images
// =============================================================

/// Output format of [`write_image`], picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// `png` (any case) selects PNG; everything else is SVG.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Png,
            _ => Self::Svg,
        }
    }
}

/// Render the export composition as an SVG document.
#[must_use]
pub fn export_svg(model: &LayoutModel, px_per_meter: f64, title: &str) -> String {
    let (width, height) = render::export_size(model.field(), px_per_meter);
    let mut surface = SvgSurface::new(width, height);
    let Ok(()) = render::draw_export(&mut surface, model, px_per_meter, title);
    surface.finish()
}

/// Render the export composition and encode it as PNG bytes.
///
/// # Errors
///
/// - [`ExportError::Svg`] if the generated SVG cannot be parsed.
/// - [`ExportError::PixmapAlloc`] for an empty or oversized image.
/// - [`ExportError::Png`] on encoder failure.
pub fn export_png(model: &LayoutModel, px_per_meter: f64, title: &str) -> Result<Vec<u8>, ExportError> {
    let svg = export_svg(model, px_per_meter, title);
    let pixmap = rasterize(&svg)?;
    encode_png(&pixmap)
}

/// Render to `path`, as PNG or SVG by extension.
///
/// # Errors
///
/// Any error from [`export_png`], or [`ExportError::Io`] when writing.
pub fn write_image(
    model: &LayoutModel,
    path: &Path,
    px_per_meter: f64,
    title: &str,
) -> Result<ImageFormat, ExportError> {
    let format = ImageFormat::from_path(path);
    let bytes = match format {
        ImageFormat::Png => export_png(model, px_per_meter, title)?,
        ImageFormat::Svg => export_svg(model, px_per_meter, title).into_bytes(),
    };
    std::fs::write(path, &bytes)?;
    info!(path = %path.display(), ?format, bytes = bytes.len(), "image written");
    Ok(format)
}

fn rasterize(svg: &str) -> Result<tiny_skia::Pixmap, ExportError> {
    let mut options = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    options.fontdb = Arc::new(fontdb);

    let tree = usvg::Tree::from_str(svg, &options)?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or(ExportError::PixmapAlloc { width: size.width(), height: size.height() })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Fixed encoder settings so identical pixels give identical files.
fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_filter(png::FilterType::NoFilter);
    encoder.set_compression(png::Compression::Default);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixmap.data())?;
    writer.finish()?;
    Ok(out)
}
