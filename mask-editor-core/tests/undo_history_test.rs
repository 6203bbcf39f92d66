//! Integration tests for undo/redo history
//!
//! Every discrete command and every finished drag must be exactly one undo
//! step, and undoing all of them must restore the starting state.

use kurbo::{Point, Rect};
use mask_editor_core::command::Command;
use mask_editor_core::editor::Editor;
use mask_editor_core::file_io::MemoryStorage;
use mask_editor_core::mask_frame::FrameGeometry;
use mask_editor_core::presets::Presets;
use mask_editor_core::tool::Direction;
use uuid::Uuid;

fn setup_editor() -> Editor<MemoryStorage> {
    let presets = Presets {
        design_canvas_x: 0.0,
        design_canvas_y: 0.0,
        design_canvas_width: 400.0,
        design_canvas_height: 300.0,
        new_mask_frame_width: 50.0,
        new_mask_frame_height: 50.0,
        min_mask_frame_size: 10.0,
        autosave_interval_ms: 0,
        ..Presets::default()
    };
    Editor::new(presets, MemoryStorage::new())
}

fn point_at(editor: &mut Editor<MemoryStorage>, x: f64, y: f64) {
    editor.set_mouse_position(x, y);
    editor.update();
}

fn new_frame(editor: &mut Editor<MemoryStorage>, x: f64, y: f64) -> Uuid {
    point_at(editor, x, y);
    editor.respond_to_command(Command::NewFrame);
    editor.layout().frames().last().unwrap().id
}

fn snapshot(editor: &Editor<MemoryStorage>) -> Vec<FrameGeometry> {
    editor.layout().frames().iter().map(|f| f.geometry()).collect()
}

#[test]
fn test_undo_everything_returns_to_empty() {
    let mut editor = setup_editor();
    let a = new_frame(&mut editor, 50.0, 50.0);
    new_frame(&mut editor, 150.0, 50.0);
    new_frame(&mut editor, 250.0, 50.0);

    // Delete the middle frame
    point_at(&mut editor, 175.0, 75.0);
    editor.respond_to_command(Command::DeleteSelected);
    assert_eq!(editor.layout().frame_count(), 2);

    // Add a point to the first and nudge it
    point_at(&mut editor, 75.0, 75.0);
    editor.respond_to_command(Command::NewPoint);
    editor.respond_to_command(Command::Nudge(Direction::Right));
    assert_eq!(editor.store().frame(&a).unwrap().x(), 51.0);

    // Drag the last frame
    point_at(&mut editor, 275.0, 75.0);
    editor.pointer_down();
    editor.set_mouse_position(285.0, 95.0);
    editor.pointer_drag();
    editor.pointer_release();

    let mut undone = 0;
    while editor.store().can_undo() {
        editor.respond_to_command(Command::Undo);
        undone += 1;
    }
    assert_eq!(undone, 7);
    assert!(editor.layout().is_empty());
}

#[test]
fn test_undo_then_redo_restores_state() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);
    point_at(&mut editor, 120.0, 120.0);
    editor.respond_to_command(Command::NewPoint);
    editor.respond_to_command(Command::Nudge(Direction::Down));
    let after = snapshot(&editor);

    editor.respond_to_command(Command::Undo);
    editor.respond_to_command(Command::Undo);
    assert!(editor.store().frame(&id).unwrap().mask_points().is_empty());

    editor.respond_to_command(Command::Redo);
    editor.respond_to_command(Command::Redo);
    assert_eq!(snapshot(&editor), after);
    assert!(!editor.store().can_redo());
}

#[test]
fn test_new_action_invalidates_redo() {
    let mut editor = setup_editor();
    new_frame(&mut editor, 100.0, 100.0);
    new_frame(&mut editor, 200.0, 100.0);

    editor.respond_to_command(Command::Undo);
    assert!(editor.store().can_redo());

    new_frame(&mut editor, 300.0, 100.0);
    assert!(!editor.store().can_redo());

    editor.respond_to_command(Command::Redo);
    assert_eq!(editor.layout().frame_count(), 2);
}

#[test]
fn test_nudge_moves_only_highlighted_frame() {
    let mut editor = setup_editor();
    let left = new_frame(&mut editor, 50.0, 50.0);
    let right = new_frame(&mut editor, 200.0, 50.0);

    point_at(&mut editor, 225.0, 75.0);
    editor.respond_to_command(Command::Nudge(Direction::Left));

    assert_eq!(editor.store().frame(&right).unwrap().position(), Point::new(199.0, 50.0));
    assert_eq!(editor.store().frame(&left).unwrap().position(), Point::new(50.0, 50.0));
}

#[test]
fn test_nudge_with_nothing_highlighted_records_nothing() {
    let mut editor = setup_editor();
    new_frame(&mut editor, 50.0, 50.0);
    point_at(&mut editor, 350.0, 250.0);

    editor.respond_to_command(Command::Nudge(Direction::Up));

    assert_eq!(editor.store().undo_description().as_deref(), Some("Add mask frame"));
}

#[test]
fn test_undo_of_delete_restores_stacking_order() {
    let mut editor = setup_editor();
    let bottom = new_frame(&mut editor, 100.0, 100.0);
    let top = new_frame(&mut editor, 120.0, 120.0);

    // Overlap region: the top frame is the one deleted
    point_at(&mut editor, 140.0, 140.0);
    editor.respond_to_command(Command::DeleteSelected);
    assert!(editor.store().frame(&top).is_none());

    editor.respond_to_command(Command::Undo);
    let order: Vec<Uuid> = editor.layout().frames().iter().map(|f| f.id).collect();
    assert_eq!(order, vec![bottom, top]);
}

#[test]
fn test_undo_refused_mid_drag() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);

    point_at(&mut editor, 125.0, 125.0);
    editor.pointer_down();
    editor.set_mouse_position(145.0, 125.0);
    editor.pointer_drag();

    editor.respond_to_command(Command::Undo);
    assert_eq!(editor.layout().frame_count(), 1);

    editor.pointer_release();
    assert_eq!(
        editor.store().frame(&id).unwrap().rect(),
        Rect::new(120.0, 100.0, 170.0, 150.0)
    );

    editor.respond_to_command(Command::Undo);
    assert_eq!(
        editor.store().frame(&id).unwrap().rect(),
        Rect::new(100.0, 100.0, 150.0, 150.0)
    );
}

#[test]
fn test_long_session_undoes_back_to_empty() {
    let mut editor = setup_editor();
    let mut actions = 0;
    for i in 0..60 {
        let x = (i % 6) as f64 * 60.0 + 5.0;
        let y = (i / 6 % 5) as f64 * 55.0 + 5.0;
        new_frame(&mut editor, x, y);
        point_at(&mut editor, x + 25.0, y + 25.0);
        editor.respond_to_command(Command::Nudge(Direction::Down));
        actions += 2;
    }
    assert!(actions > 100);
    assert_eq!(editor.store().undo_description().as_deref(), Some("Nudge mask frame"));

    for _ in 0..actions {
        assert!(editor.store().can_undo());
        editor.respond_to_command(Command::Undo);
    }
    assert!(editor.layout().is_empty());
    assert!(!editor.store().can_undo());
}
