#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

/// Engine with the default 20 x 15 field at 30 px/m and a 40 px margin.
fn core() -> EngineCore {
    EngineCore::default()
}

fn screen(core: &EngineCore, x: f64, y: f64) -> Point {
    core.mapper.to_screen(Point::new(x, y))
}

fn place(core: &mut EngineCore, kind: ItemKind, x: f64, y: f64, w: f64, h: f64) -> ItemId {
    let template = Template::new(kind, w, h);
    match core.model.place_item(&template, Point::new(x, y)) {
        Ok(item) => item.id,
        Err(e) => panic!("setup placement failed: {e}"),
    }
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded(_)))
}

fn rejected_code(actions: &[Action]) -> Option<&'static str> {
    actions.iter().find_map(|a| match a {
        Action::Rejected { code, .. } => Some(*code),
        _ => None,
    })
}

struct Answer {
    yes: bool,
    asked: Vec<String>,
}

impl Answer {
    fn yes() -> Self {
        Self { yes: true, asked: Vec::new() }
    }

    fn no() -> Self {
        Self { yes: false, asked: Vec::new() }
    }
}

impl Prompter for Answer {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_owned());
        self.yes
    }
}

struct FixedContainer(f64, f64);

impl ContainerSize for FixedContainer {
    fn container_size(&self) -> (f64, f64) {
        (self.0, self.1)
    }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn core_default_is_idle_and_empty() {
    let core = core();
    assert_eq!(core.mode(), Mode::Idle);
    assert_eq!(core.selection(), None);
    assert!(core.items().is_empty());
    assert_eq!(core.field(), Field { width: 20.0, height: 15.0 });
}

#[test]
fn core_new_uses_configured_field() {
    let config = EditorConfig { field_width: 12.0, field_height: 9.0, ..EditorConfig::default() };
    let core = EngineCore::new(config);
    assert_eq!(core.field(), Field { width: 12.0, height: 9.0 });
}

#[test]
fn core_new_with_bad_field_falls_back_to_default() {
    let config = EditorConfig { field_width: -1.0, ..EditorConfig::default() };
    let core = EngineCore::new(config);
    assert_eq!(core.field(), Field::default());
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn set_viewport_fits_scale() {
    let mut core = core();
    let actions = core.set_viewport(880.0, 680.0);
    assert_eq!(core.mapper.scale, 40.0);
    assert_eq!(actions, vec![Action::RenderNeeded(RenderScope::Full)]);
}

#[test]
fn set_viewport_surface_size_includes_margin() {
    let mut core = core();
    core.set_viewport(880.0, 680.0);
    assert_eq!(core.surface_size(), (880.0, 680.0));
}

#[test]
fn sync_viewport_reads_provider() {
    let mut core = core();
    core.sync_viewport(&FixedContainer(480.0, 1000.0));
    // Width-limited: 400 px across 20 m.
    assert_eq!(core.mapper.scale, 20.0);
    assert_eq!(core.container_width, 480.0);
}

#[test]
fn resize_field_refits_to_container() {
    let mut core = core();
    core.set_viewport(880.0, 680.0);
    let actions = core.resize_field(40.0, 10.0);
    assert!(has_render_needed(&actions));
    // Width-limited: 800 px across 40 m.
    assert_eq!(core.mapper.scale, 20.0);
    assert_eq!(core.field().width, 40.0);
}

#[test]
fn resize_field_rejects_non_positive() {
    let mut core = core();
    let actions = core.resize_field(0.0, 10.0);
    assert_eq!(rejected_code(&actions), Some("E_INVALID_DIMENSION"));
    assert_eq!(core.field(), Field::default());
}

// =============================================================
// Palette and placement
// =============================================================

#[test]
fn select_kind_arms_placement() {
    let mut core = core();
    core.select_kind(ItemKind::Cnc);
    assert_eq!(core.mode(), Mode::PlacingFromTemplate);
}

#[test]
fn clear_palette_returns_to_idle() {
    let mut core = core();
    core.select_kind(ItemKind::Cnc);
    core.clear_palette();
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn click_in_field_places_template_at_pointer() {
    let mut core = core();
    core.select_kind(ItemKind::Cnc);
    let p = screen(&core, 5.0, 4.0);
    let actions = core.on_pointer_down(p, Button::Primary, 0.0);

    assert!(has_action(&actions, |a| matches!(a, Action::ItemPlaced(_))));
    assert_eq!(core.items().len(), 1);
    let item = &core.items()[0];
    assert_eq!((item.x, item.y), (5.0, 4.0));
    assert_eq!((item.width, item.height), (3.0, 2.0));
    assert_eq!(item.name, "CNC Machine");
}

#[test]
fn successful_placement_exits_placing_mode() {
    let mut core = core();
    core.select_kind(ItemKind::Robot);
    core.on_pointer_down(screen(&core, 1.0, 1.0), Button::Primary, 0.0);
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn colliding_placement_is_rejected_and_exits_placing_mode() {
    let mut core = core();
    place(&mut core, ItemKind::Obstacle, 4.0, 4.0, 4.0, 4.0);
    core.select_kind(ItemKind::Cnc);
    // The pointer misses the obstacle but the 3 x 2 footprint reaches into it.
    let actions = core.on_pointer_down(screen(&core, 2.0, 3.0), Button::Primary, 0.0);

    assert_eq!(rejected_code(&actions), Some("E_COLLISION"));
    assert_eq!(core.items().len(), 1);
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn click_outside_field_keeps_template_armed() {
    let mut core = core();
    core.select_kind(ItemKind::Cnc);
    let actions = core.on_pointer_down(Point::new(5.0, 5.0), Button::Primary, 0.0);
    assert!(actions.is_empty());
    assert!(core.items().is_empty());
    assert_eq!(core.mode(), Mode::PlacingFromTemplate);
}

#[test]
fn click_in_field_without_template_places_nothing() {
    let mut core = core();
    let actions = core.on_pointer_down(screen(&core, 5.0, 5.0), Button::Primary, 0.0);
    assert!(actions.is_empty());
    assert!(core.items().is_empty());
}

#[test]
fn select_template_uses_custom_size() {
    let mut core = core();
    core.select_template(Template::new(ItemKind::Storage, 1.5, 1.0));
    core.on_pointer_down(screen(&core, 0.0, 0.0), Button::Primary, 0.0);
    let item = &core.items()[0];
    assert_eq!((item.width, item.height), (1.5, 1.0));
}

#[test]
fn add_from_palette_without_template_reports() {
    let mut core = core();
    let actions = core.add_from_palette();
    assert_eq!(rejected_code(&actions), Some("E_NO_TEMPLATE"));
}

#[test]
fn add_from_palette_places_at_default_spot() {
    let mut core = core();
    core.select_kind(ItemKind::Press);
    let actions = core.add_from_palette();
    assert!(has_action(&actions, |a| matches!(a, Action::ItemPlaced(_))));
    let item = &core.items()[0];
    assert_eq!((item.x, item.y), (2.5, 2.5));
    assert_eq!(core.mode(), Mode::PlacingFromTemplate);
}

#[test]
fn add_from_palette_twice_collides() {
    let mut core = core();
    core.select_kind(ItemKind::Obstacle);
    core.add_from_palette();
    let actions = core.add_from_palette();
    assert_eq!(rejected_code(&actions), Some("E_COLLISION"));
    assert_eq!(core.items().len(), 1);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn press_on_item_selects_and_starts_drag() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let actions = core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 0.0);

    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(Some(id))));
    assert_eq!(core.selection(), Some(id));
    assert_eq!(core.mode(), Mode::Dragging);
}

#[test]
fn press_on_empty_space_clears_selection() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 0.0);
    core.on_pointer_up(screen(&core, 2.0, 2.0), Button::Primary);
    assert_eq!(core.selection(), Some(id));

    let actions = core.on_pointer_down(screen(&core, 10.0, 10.0), Button::Primary, 10.0);
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(None)));
    assert_eq!(core.selection(), None);
}

#[test]
fn press_on_item_while_placing_does_not_place() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    core.select_kind(ItemKind::Robot);
    core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 0.0);
    assert_eq!(core.items().len(), 1);
    assert_eq!(core.mode(), Mode::Dragging);
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let actions = core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Secondary, 0.0);
    assert!(actions.is_empty());
    assert_eq!(core.mode(), Mode::Idle);
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_keeps_grab_offset() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let start = screen(&core, 2.0, 2.0);
    core.on_pointer_down(start, Button::Primary, 0.0);
    // 60 px right is 2 m at 30 px/m.
    core.on_pointer_move(Point::new(start.x + 60.0, start.y), 20.0);

    let item = core.item(id).map(|i| (i.x, i.y));
    assert_eq!(item, Some((3.0, 1.0)));
}

#[test]
fn small_motion_within_tolerance_does_not_move() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let start = screen(&core, 2.0, 2.0);
    core.on_pointer_down(start, Button::Primary, 0.0);
    let actions = core.on_pointer_move(Point::new(start.x + 3.0, start.y), 20.0);

    assert!(actions.is_empty());
    assert_eq!(core.item(id).map(|i| i.x), Some(1.0));
}

#[test]
fn drag_is_clamped_to_field() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let start = screen(&core, 2.0, 2.0);
    core.on_pointer_down(start, Button::Primary, 0.0);
    core.on_pointer_move(Point::new(start.x + 3000.0, start.y - 3000.0), 20.0);

    let item = core.item(id).map(|i| (i.x, i.y));
    assert_eq!(item, Some((18.0, 0.0)));
}

#[test]
fn drag_into_obstacle_is_blocked() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    place(&mut core, ItemKind::Obstacle, 5.0, 1.0, 2.0, 2.0);
    let start = screen(&core, 2.0, 2.0);
    core.on_pointer_down(start, Button::Primary, 0.0);
    // Would put the CNC at x = 4, overlapping the obstacle.
    let actions = core.on_pointer_move(Point::new(start.x + 90.0, start.y), 20.0);

    assert!(actions.is_empty());
    assert_eq!(core.item(id).map(|i| i.x), Some(1.0));
    assert_eq!(core.mode(), Mode::Dragging);
}

#[test]
fn drag_redraws_are_throttled_but_moves_are_not() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let start = screen(&core, 2.0, 2.0);
    core.on_pointer_down(start, Button::Primary, 0.0);

    let first = core.on_pointer_move(Point::new(start.x + 30.0, start.y), 100.0);
    let second = core.on_pointer_move(Point::new(start.x + 60.0, start.y), 105.0);

    assert!(has_render_needed(&first));
    assert!(!has_render_needed(&second));
    assert!(has_action(&second, |a| matches!(a, Action::ItemUpdated(_))));
    assert_eq!(core.item(id).map(|i| i.x), Some(3.0));

    let third = core.on_pointer_move(Point::new(start.x + 90.0, start.y), 120.0);
    assert!(has_render_needed(&third));
}

#[test]
fn pointer_up_ends_drag_and_flushes_render() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let start = screen(&core, 2.0, 2.0);
    core.on_pointer_down(start, Button::Primary, 0.0);
    let actions = core.on_pointer_up(start, Button::Primary);

    assert_eq!(actions, vec![Action::RenderNeeded(RenderScope::Items)]);
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn pointer_up_without_drag_is_noop() {
    let mut core = core();
    assert!(core.on_pointer_up(Point::new(0.0, 0.0), Button::Primary).is_empty());
}

#[test]
fn move_without_drag_is_noop() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    assert!(core.on_pointer_move(screen(&core, 8.0, 8.0), 0.0).is_empty());
}

// =============================================================
// Long-press
// =============================================================

#[test]
fn tick_before_delay_does_nothing() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 1000.0);
    let mut prompter = Answer::yes();

    assert!(core.tick(1799.0, &mut prompter).is_empty());
    assert!(prompter.asked.is_empty());
    assert_eq!(core.mode(), Mode::Dragging);
}

#[test]
fn long_press_confirmed_deletes_item() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 1000.0);
    let mut prompter = Answer::yes();
    let actions = core.tick(1800.0, &mut prompter);

    assert_eq!(prompter.asked, vec!["Delete CNC Machine 1?".to_owned()]);
    assert!(has_action(&actions, |a| *a == Action::ItemDeleted { id }));
    assert!(core.items().is_empty());
    assert_eq!(core.selection(), None);
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn long_press_declined_keeps_item() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 0.0);
    let mut prompter = Answer::no();
    let actions = core.tick(900.0, &mut prompter);

    assert!(actions.is_empty());
    assert_eq!(prompter.asked.len(), 1);
    assert_eq!(core.items().len(), 1);
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn long_press_fires_only_once() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 0.0);
    let mut prompter = Answer::no();
    core.tick(900.0, &mut prompter);
    core.tick(1900.0, &mut prompter);
    assert_eq!(prompter.asked.len(), 1);
}

#[test]
fn motion_cancels_long_press() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let start = screen(&core, 2.0, 2.0);
    core.on_pointer_down(start, Button::Primary, 0.0);
    core.on_pointer_move(Point::new(start.x + 30.0, start.y), 100.0);
    let mut prompter = Answer::yes();

    assert!(core.tick(2000.0, &mut prompter).is_empty());
    assert!(prompter.asked.is_empty());
    assert_eq!(core.items().len(), 1);
}

#[test]
fn release_cancels_long_press() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let start = screen(&core, 2.0, 2.0);
    core.on_pointer_down(start, Button::Primary, 0.0);
    core.on_pointer_up(start, Button::Primary);
    let mut prompter = Answer::yes();

    assert!(core.tick(2000.0, &mut prompter).is_empty());
    assert_eq!(core.items().len(), 1);
}

#[test]
fn long_press_honours_configured_delay() {
    let config = EditorConfig { long_press_ms: 300.0, ..EditorConfig::default() };
    let mut core = EngineCore::new(config);
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 0.0);
    let mut prompter = Answer::yes();
    core.tick(300.0, &mut prompter);
    assert!(core.items().is_empty());
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn delete_key_removes_active_item() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    assert!(core.model.select(id).is_ok());
    let actions = core.on_key_down(&Key::new("Delete"));

    assert!(has_action(&actions, |a| *a == Action::ItemDeleted { id }));
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(None)));
    assert!(core.items().is_empty());
}

#[test]
fn backspace_also_deletes() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    assert!(core.model.select(id).is_ok());
    core.on_key_down(&Key::new("Backspace"));
    assert!(core.items().is_empty());
}

#[test]
fn delete_key_without_selection_is_noop() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    assert!(core.on_key_down(&Key::new("Delete")).is_empty());
    assert_eq!(core.items().len(), 1);
}

#[test]
fn other_keys_are_ignored() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    assert!(core.model.select(id).is_ok());
    assert!(core.on_key_down(&Key::new("a")).is_empty());
    assert_eq!(core.items().len(), 1);
}

// =============================================================
// Item edits
// =============================================================

#[test]
fn size_input_applies_valid_value() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let actions = core.on_size_input(id, Dimension::Width, "3.5");
    assert!(has_render_needed(&actions));
    assert_eq!(core.item(id).map(|i| i.width), Some(3.5));
}

#[test]
fn size_input_ignores_garbage() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    assert!(core.on_size_input(id, Dimension::Width, "abc").is_empty());
    assert!(core.on_size_input(id, Dimension::Width, "25").is_empty());
    assert_eq!(core.item(id).map(|i| i.width), Some(2.0));
}

#[test]
fn size_input_collision_resyncs_without_message() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    place(&mut core, ItemKind::Obstacle, 4.0, 1.0, 2.0, 2.0);
    let actions = core.on_size_input(id, Dimension::Width, "5");

    assert_eq!(rejected_code(&actions), None);
    assert!(has_action(&actions, |a| matches!(a, Action::ItemUpdated(i) if i.width == 2.0)));
    assert_eq!(core.item(id).map(|i| i.width), Some(2.0));
}

#[test]
fn size_commit_clamps_and_rounds() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 0.0, 0.0, 2.0, 2.0);
    core.on_size_commit(id, Dimension::Height, "25");
    assert_eq!(core.item(id).map(|i| i.height), Some(20.0));
    core.on_size_commit(id, Dimension::Width, "1.234");
    assert_eq!(core.item(id).map(|i| i.width), Some(1.23));
}

#[test]
fn size_commit_collision_reports_and_restores() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    place(&mut core, ItemKind::Obstacle, 4.0, 1.0, 2.0, 2.0);
    let actions = core.on_size_commit(id, Dimension::Width, "5");

    assert_eq!(rejected_code(&actions), Some("E_COLLISION"));
    assert!(has_action(&actions, |a| matches!(a, Action::ItemUpdated(i) if i.width == 2.0)));
    assert_eq!(core.item(id).map(|i| i.width), Some(2.0));
}

#[test]
fn set_overlap_allowed_updates_item() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let actions = core.set_overlap_allowed(id, false);
    assert!(has_action(&actions, |a| matches!(a, Action::ItemUpdated(i) if !i.allow_overlap)));
}

#[test]
fn rename_blank_restores_default_name() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Robot, 1.0, 1.0, 2.0, 2.0);
    core.rename(id, "Arm A");
    assert_eq!(core.item(id).map(|i| i.name.as_str()), Some("Arm A"));
    core.rename(id, "   ");
    assert_eq!(core.item(id).map(|i| i.name.as_str()), Some("Industrial Robot"));
}

#[test]
fn edits_on_stale_id_are_noops() {
    let mut core = core();
    assert!(core.rename(42, "x").is_empty());
    assert!(core.set_overlap_allowed(42, true).is_empty());
    assert!(core.delete(42).is_empty());
    assert_eq!(rejected_code(&core.on_size_commit(42, Dimension::Width, "2")), Some("E_ITEM_NOT_FOUND"));
}

// =============================================================
// Delete and clear
// =============================================================

#[test]
fn delete_inactive_item_keeps_selection() {
    let mut core = core();
    let a = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let b = place(&mut core, ItemKind::Cnc, 5.0, 5.0, 2.0, 2.0);
    assert!(core.model.select(a).is_ok());
    let actions = core.delete(b);

    assert!(!has_action(&actions, |a| matches!(a, Action::SelectionChanged(_))));
    assert_eq!(core.selection(), Some(a));
}

#[test]
fn delete_dragged_item_ends_drag() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    core.on_pointer_down(screen(&core, 2.0, 2.0), Button::Primary, 0.0);
    core.delete(id);
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn clear_all_declined_keeps_layout() {
    let mut core = core();
    place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    let mut prompter = Answer::no();
    assert!(core.clear_all(&mut prompter).is_empty());
    assert_eq!(core.items().len(), 1);
}

#[test]
fn clear_all_confirmed_resets_everything() {
    let mut core = core();
    let id = place(&mut core, ItemKind::Cnc, 1.0, 1.0, 2.0, 2.0);
    assert!(core.model.select(id).is_ok());
    core.select_kind(ItemKind::Robot);
    let mut prompter = Answer::yes();
    let actions = core.clear_all(&mut prompter);

    assert!(has_action(&actions, |a| *a == Action::LayoutCleared));
    assert!(core.items().is_empty());
    assert_eq!(core.selection(), None);
    assert_eq!(core.mode(), Mode::Idle);

    // Ids restart after a clear.
    core.select_kind(ItemKind::Robot);
    core.add_from_palette();
    assert_eq!(core.items()[0].id, 1);
}
