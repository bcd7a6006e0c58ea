//! Layout model: the field, the placed items, and the overlap policy.
//!
//! `LayoutModel` is the single owner of layout state for one editing session.
//! Every mutation that changes an item's footprint is checked against the
//! overlap policy at the moment it is applied; nothing re-validates the layout
//! afterwards. In particular [`LayoutModel::resize_field`] never touches
//! existing items, so a shrink can leave items outside the field.
//!
//! Items are kept in insertion order. That order is the list order shown to
//! the user and the priority order for hit-testing; it is not a z-order.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::consts::{
    DEFAULT_ADD_X_M, DEFAULT_ADD_Y_M, DEFAULT_FIELD_HEIGHT_M, DEFAULT_FIELD_WIDTH_M, MAX_ITEM_SIZE_M,
    MIN_COMMITTED_SIZE_M, SIZE_EPSILON_M,
};
use crate::error::LayoutError;
use crate::geometry::Rect;
use crate::mapper::Point;
use crate::palette::Template;

/// Identifier of a placed item. Assigned from a per-session counter.
pub type ItemId = u64;

/// Equipment category. Each kind carries a default name and icon glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Exclusive zone; never overlaps anything.
    Obstacle,
    Cnc,
    Robot,
    Conveyor,
    Press,
    Furnace,
    Storage,
    /// Fallback for unrecognized kinds in imported files.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ItemKind {
    /// Every kind, in palette order.
    pub const ALL: [ItemKind; 8] = [
        Self::Obstacle,
        Self::Cnc,
        Self::Robot,
        Self::Conveyor,
        Self::Press,
        Self::Furnace,
        Self::Storage,
        Self::Unknown,
    ];

    /// Display name given to new items of this kind.
    #[must_use]
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Obstacle => "Obstacle",
            Self::Cnc => "CNC Machine",
            Self::Robot => "Industrial Robot",
            Self::Conveyor => "Conveyor",
            Self::Press => "Stamping Press",
            Self::Furnace => "Heat Treatment Furnace",
            Self::Storage => "Storage Area",
            Self::Unknown => "Unknown Machine",
        }
    }

    /// Icon glyph shown next to the name in item lists.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Obstacle => "🚧",
            Self::Cnc => "🖥️",
            Self::Robot => "🤖",
            Self::Conveyor | Self::Storage => "📦",
            Self::Press => "⚡",
            Self::Furnace => "🔥",
            Self::Unknown => "⚙️",
        }
    }

    #[must_use]
    pub fn is_obstacle(self) -> bool {
        self == Self::Obstacle
    }
}

/// The bounded floor area, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f64,
    pub height: f64,
}

impl Default for Field {
    fn default() -> Self {
        Self { width: DEFAULT_FIELD_WIDTH_M, height: DEFAULT_FIELD_HEIGHT_M }
    }
}

impl Field {
    /// Build a field, rejecting non-finite or non-positive sides.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] naming the first bad side.
    pub fn new(width: f64, height: f64) -> Result<Self, LayoutError> {
        for value in [width, height] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidDimension { value });
            }
        }
        Ok(Self { width, height })
    }

    /// The field as a rectangle anchored at the origin.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A placed equipment instance.
///
/// Field names follow the export file format (`machineType` for the kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    /// Left edge in meters.
    pub x: f64,
    /// Top edge in meters.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub name: String,
    pub icon: String,
    #[serde(rename = "machineType")]
    pub kind: ItemKind,
    pub allow_overlap: bool,
}

impl Item {
    /// The item's footprint.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Which side of an item a size edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

/// Result of a drag step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// The item now sits at the contained (clamped) position.
    Moved(Point),
    /// The clamped position collides; the item did not move.
    Blocked,
}

/// Extent of the area covered by items (`actualDimensions` in exports).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedBounds {
    pub width: f64,
    pub height: f64,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// A footprint under test, with the overlap attributes it would carry.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    kind: ItemKind,
    allow_overlap: bool,
    rect: Rect,
}

impl Candidate {
    fn of(item: &Item) -> Self {
        Self { kind: item.kind, allow_overlap: item.allow_overlap, rect: item.rect() }
    }

    /// Overlap policy against one existing item.
    ///
    /// Obstacles on either side make any intersection a collision. Otherwise an
    /// intersection is only legal when both sides allow overlap.
    fn conflicts_with(&self, other: &Item) -> bool {
        if !self.rect.intersects(&other.rect()) {
            return false;
        }
        if self.kind.is_obstacle() || other.kind.is_obstacle() {
            return true;
        }
        !self.allow_overlap || !other.allow_overlap
    }
}

/// Parse a size typed by the user. `None` for anything that is not a finite number.
#[must_use]
pub fn parse_dimension(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

fn valid_size(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= MAX_ITEM_SIZE_M
}

fn round_to_centimeters(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Field, items, and the active selection for one editing session.
#[derive(Debug, Clone, Default)]
pub struct LayoutModel {
    field: Field,
    items: Vec<Item>,
    /// Last id handed out; the next item gets `last_id + 1`.
    last_id: ItemId,
    active: Option<ItemId>,
}

impl LayoutModel {
    /// An empty layout on `field`.
    #[must_use]
    pub fn new(field: Field) -> Self {
        Self { field, items: Vec::new(), last_id: 0, active: None }
    }

    /// Rebuild a model from previously exported state.
    ///
    /// Items are taken as-is, without re-checking the overlap policy or field
    /// bounds. The id counter resumes after the highest restored id.
    #[must_use]
    pub fn restore(field: Field, items: Vec<Item>) -> Self {
        let last_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        Self { field, items, last_id, active: None }
    }

    // --- Queries ---

    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The actively selected item, if any.
    #[must_use]
    pub fn active(&self) -> Option<ItemId> {
        self.active
    }

    /// Bounding box over every item, or `None` when the layout is empty.
    #[must_use]
    pub fn occupied_bounds(&self) -> Option<OccupiedBounds> {
        let first = self.items.first()?;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x + first.width;
        let mut max_y = first.y + first.height;
        for item in &self.items[1..] {
            min_x = min_x.min(item.x);
            min_y = min_y.min(item.y);
            max_x = max_x.max(item.x + item.width);
            max_y = max_y.max(item.y + item.height);
        }
        Some(OccupiedBounds { width: max_x - min_x, height: max_y - min_y, min_x, min_y, max_x, max_y })
    }

    /// Every pair of items that currently violates the overlap policy.
    ///
    /// Only imported layouts can contain such pairs; edits made through this
    /// model never commit one.
    #[must_use]
    pub fn conflicts(&self) -> Vec<(ItemId, ItemId)> {
        let mut out = Vec::new();
        for (i, a) in self.items.iter().enumerate() {
            let candidate = Candidate::of(a);
            for b in &self.items[i + 1..] {
                if candidate.conflicts_with(b) {
                    out.push((a.id, b.id));
                }
            }
        }
        out
    }

    /// Items that extend past the field boundary.
    #[must_use]
    pub fn out_of_bounds(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| {
                item.x < 0.0
                    || item.y < 0.0
                    || item.x + item.width > self.field.width
                    || item.y + item.height > self.field.height
            })
            .map(|item| item.id)
            .collect()
    }

    // --- Selection ---

    /// Make `id` the active selection.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for a stale id.
    pub fn select(&mut self, id: ItemId) -> Result<(), LayoutError> {
        self.index_of(id)?;
        self.active = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    // --- Mutations ---

    /// Replace the field dimensions.
    ///
    /// Existing items are neither moved nor re-validated.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] for a non-finite or
    /// non-positive side; the field is left unchanged.
    pub fn resize_field(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        self.field = Field::new(width, height)?;
        debug!(width, height, "field resized");
        Ok(())
    }

    /// Place a new item from `template` with its top-left corner at `position`.
    ///
    /// The candidate is tested against every existing item with the template's
    /// kind and overlap flag. Nothing is mutated on failure.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidDimension`] if the template size is outside `(0, 20]`.
    /// - [`LayoutError::Collision`] if the overlap policy rejects the position.
    pub fn place_item(&mut self, template: &Template, position: Point) -> Result<Item, LayoutError> {
        for value in [template.width, template.height] {
            if !valid_size(value) {
                return Err(LayoutError::InvalidDimension { value });
            }
        }
        let candidate = Candidate {
            kind: template.kind,
            allow_overlap: template.allow_overlap,
            rect: Rect::new(position.x, position.y, template.width, template.height),
        };
        if let Some(other) = self.find_conflict(&candidate, None) {
            warn!(kind = ?template.kind, x = position.x, y = position.y, other, "placement rejected");
            return Err(LayoutError::Collision { id: None, other });
        }

        self.last_id += 1;
        let item = Item {
            id: self.last_id,
            x: position.x,
            y: position.y,
            width: template.width,
            height: template.height,
            name: template.name.clone(),
            icon: template.icon.clone(),
            kind: template.kind,
            allow_overlap: template.allow_overlap,
        };
        debug!(id = item.id, kind = ?item.kind, x = item.x, y = item.y, "item placed");
        self.items.push(item.clone());
        Ok(item)
    }

    /// The explicit "add" action: place at the default drop position.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutModel::place_item`].
    pub fn add_item(&mut self, template: &Template) -> Result<Item, LayoutError> {
        self.place_item(template, Point::new(DEFAULT_ADD_X_M, DEFAULT_ADD_Y_M))
    }

    /// Drag step: move item `id` toward `position`.
    ///
    /// The position is first clamped so the item stays inside the field, then
    /// tested against all other items. A collision leaves the item where it
    /// was and reports [`MoveOutcome::Blocked`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for a stale id.
    pub fn move_item(&mut self, id: ItemId, position: Point) -> Result<MoveOutcome, LayoutError> {
        let idx = self.index_of(id)?;
        let item = &self.items[idx];

        // A field narrower than the item pins it to the origin.
        let max_x = self.field.width - item.width;
        let max_y = self.field.height - item.height;
        let x = position.x.min(max_x).max(0.0);
        let y = position.y.min(max_y).max(0.0);

        let candidate = Candidate { rect: Rect::new(x, y, item.width, item.height), ..Candidate::of(item) };
        if self.find_conflict(&candidate, Some(id)).is_some() {
            return Ok(MoveOutcome::Blocked);
        }

        let item = &mut self.items[idx];
        item.x = x;
        item.y = y;
        Ok(MoveOutcome::Moved(Point::new(x, y)))
    }

    /// Live size edit of one side of item `id`.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::ItemNotFound`] for a stale id.
    /// - [`LayoutError::InvalidDimension`] for a value outside `(0, 20]`; no mutation.
    /// - [`LayoutError::Collision`] if the new footprint overlaps; the old value is kept.
    pub fn resize_item(&mut self, id: ItemId, dimension: Dimension, value: f64) -> Result<(), LayoutError> {
        let idx = self.index_of(id)?;
        if !valid_size(value) {
            return Err(LayoutError::InvalidDimension { value });
        }
        self.apply_size(idx, dimension, value)
    }

    /// Finalize a size edit from raw text input.
    ///
    /// Unparseable or non-positive input becomes `0.01`, anything above the
    /// maximum becomes `20`, and the result is rounded to centimeters. The
    /// value is applied only if it differs from the current one. Returns the
    /// value the item holds afterwards.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::ItemNotFound`] for a stale id.
    /// - [`LayoutError::Collision`] if the clamped size overlaps; the old value is kept.
    pub fn commit_item_size(&mut self, id: ItemId, dimension: Dimension, raw: &str) -> Result<f64, LayoutError> {
        let idx = self.index_of(id)?;
        // Overflowing input such as "Infinity" or "1e999" clamps to the maximum.
        let value = match raw.trim().parse::<f64>() {
            Ok(v) if v > 0.0 => round_to_centimeters(v.min(MAX_ITEM_SIZE_M)),
            _ => MIN_COMMITTED_SIZE_M,
        };

        let current = side(&self.items[idx], dimension);
        if (value - current).abs() <= SIZE_EPSILON_M {
            return Ok(current);
        }
        self.apply_size(idx, dimension, value)?;
        Ok(value)
    }

    /// Toggle overlap permission. Obstacles ignore the request.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for a stale id.
    pub fn set_overlap_allowed(&mut self, id: ItemId, allowed: bool) -> Result<(), LayoutError> {
        let idx = self.index_of(id)?;
        let item = &mut self.items[idx];
        if item.kind.is_obstacle() {
            return Ok(());
        }
        item.allow_overlap = allowed;
        Ok(())
    }

    /// Rename item `id`. A blank name falls back to the kind's default name.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for a stale id.
    pub fn rename_item(&mut self, id: ItemId, name: &str) -> Result<(), LayoutError> {
        let idx = self.index_of(id)?;
        let item = &mut self.items[idx];
        item.name = if name.trim().is_empty() {
            item.kind.default_name().to_owned()
        } else {
            name.to_owned()
        };
        Ok(())
    }

    /// Remove item `id`, dropping the active selection if it pointed there.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for a stale id.
    pub fn delete_item(&mut self, id: ItemId) -> Result<Item, LayoutError> {
        let idx = self.index_of(id)?;
        let item = self.items.remove(idx);
        if self.active == Some(id) {
            self.active = None;
        }
        info!(id, "item deleted");
        Ok(item)
    }

    /// Remove every item and restart ids at 1.
    pub fn clear(&mut self) {
        self.items.clear();
        self.last_id = 0;
        self.active = None;
        info!("layout cleared");
    }

    // --- Internals ---

    fn index_of(&self, id: ItemId) -> Result<usize, LayoutError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(LayoutError::ItemNotFound(id))
    }

    /// First item (by insertion order) the candidate may not overlap.
    fn find_conflict(&self, candidate: &Candidate, exclude: Option<ItemId>) -> Option<ItemId> {
        self.items
            .iter()
            .filter(|item| Some(item.id) != exclude)
            .find(|item| candidate.conflicts_with(item))
            .map(|item| item.id)
    }

    fn apply_size(&mut self, idx: usize, dimension: Dimension, value: f64) -> Result<(), LayoutError> {
        let item = &self.items[idx];
        let id = item.id;
        let mut rect = item.rect();
        match dimension {
            Dimension::Width => rect.width = value,
            Dimension::Height => rect.height = value,
        }
        let candidate = Candidate { rect, ..Candidate::of(item) };
        if let Some(other) = self.find_conflict(&candidate, Some(id)) {
            warn!(id, ?dimension, value, other, "resize rejected");
            return Err(LayoutError::Collision { id: Some(id), other });
        }

        let item = &mut self.items[idx];
        match dimension {
            Dimension::Width => item.width = value,
            Dimension::Height => item.height = value,
        }
        debug!(id, ?dimension, value, "item resized");
        Ok(())
    }
}

fn side(item: &Item, dimension: Dimension) -> f64 {
    match dimension {
        Dimension::Width => item.width,
        Dimension::Height => item.height,
    }
}
