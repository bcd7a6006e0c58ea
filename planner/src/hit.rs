#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::mapper::{CoordinateMapper, Point};
use crate::model::{ItemId, LayoutModel};

/// The item under `screen_pt`, if any.
///
/// Items are tested in insertion order and the first match wins, so where
/// items overlap the earlier-placed one takes the pointer. Edges count as inside.
#[must_use]
pub fn hit_test(screen_pt: Point, model: &LayoutModel, mapper: &CoordinateMapper) -> Option<ItemId> {
    let pt = mapper.to_field(screen_pt);
    model
        .items()
        .iter()
        .find(|item| item.rect().contains(pt.x, pt.y))
        .map(|item| item.id)
}

/// Whether `screen_pt` falls within the field (border included).
#[must_use]
pub fn in_field(screen_pt: Point, model: &LayoutModel, mapper: &CoordinateMapper) -> bool {
    let pt = mapper.to_field(screen_pt);
    model.field().rect().contains(pt.x, pt.y)
}
