//! Placement templates: what a palette selection puts on the field.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use crate::model::ItemKind;

/// A kind plus size chosen before placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub kind: ItemKind,
    /// Width in meters.
    pub width: f64,
    /// Height in meters.
    pub height: f64,
    pub name: String,
    pub icon: String,
    pub allow_overlap: bool,
}

impl Template {
    /// Template with the kind's default name and icon.
    ///
    /// Overlap is allowed for every kind except obstacles.
    #[must_use]
    pub fn new(kind: ItemKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
            name: kind.default_name().to_owned(),
            icon: kind.icon().to_owned(),
            allow_overlap: !kind.is_obstacle(),
        }
    }

    #[must_use]
    pub fn with_allow_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self
    }
}

/// Default footprint for each kind, in meters.
#[must_use]
pub fn default_size(kind: ItemKind) -> (f64, f64) {
    match kind {
        ItemKind::Obstacle | ItemKind::Robot | ItemKind::Unknown => (2.0, 2.0),
        ItemKind::Cnc => (3.0, 2.0),
        ItemKind::Conveyor => (6.0, 1.0),
        ItemKind::Press => (2.5, 2.0),
        ItemKind::Furnace => (3.0, 3.0),
        ItemKind::Storage => (4.0, 3.0),
    }
}

/// The set of templates a host offers, one per kind.
#[derive(Debug, Clone)]
pub struct Palette {
    templates: Vec<Template>,
}

impl Default for Palette {
    fn default() -> Self {
        let templates = ItemKind::ALL
            .iter()
            .map(|&kind| {
                let (w, h) = default_size(kind);
                Template::new(kind, w, h)
            })
            .collect();
        Self { templates }
    }
}

impl Palette {
    /// Template for `kind`, if the palette offers one.
    #[must_use]
    pub fn template(&self, kind: ItemKind) -> Option<&Template> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    /// Replace the default size for `kind`; adds the kind if missing.
    pub fn set_size(&mut self, kind: ItemKind, width: f64, height: f64) {
        match self.templates.iter_mut().find(|t| t.kind == kind) {
            Some(t) => {
                t.width = width;
                t.height = height;
            }
            None => self.templates.push(Template::new(kind, width, height)),
        }
    }

    /// Templates in palette order.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }
}
