//! Integration tests for pointer-driven transforms
//!
//! Drives the editor the way the window shell does: set the pointer, run the
//! per-frame update, then press/drag/release.

use kurbo::{Point, Rect};
use mask_editor_core::command::Command;
use mask_editor_core::editor::Editor;
use mask_editor_core::file_io::MemoryStorage;
use mask_editor_core::mask_frame::MaskPoint;
use mask_editor_core::presets::Presets;
use mask_editor_core::tool::TransformState;
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

fn move_pointer(editor: &mut Editor<MemoryStorage>, x: f64, y: f64) {
    editor.set_mouse_position(x, y);
    editor.update();
}

/// Create a frame with its top-left at the pointer
fn new_frame(editor: &mut Editor<MemoryStorage>, x: f64, y: f64) -> Uuid {
    move_pointer(editor, x, y);
    editor.respond_to_command(Command::NewFrame);
    editor.layout().frames().last().unwrap().id
}

fn drag(editor: &mut Editor<MemoryStorage>, path: &[(f64, f64)]) {
    let (&(x, y), rest) = path.split_first().unwrap();
    move_pointer(editor, x, y);
    editor.pointer_down();
    for &(x, y) in rest {
        editor.set_mouse_position(x, y);
        editor.pointer_drag();
    }
    editor.pointer_release();
}

#[test]
fn test_translate_keeps_grab_offset() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);

    // Grab the body 25 units in from the top-left
    move_pointer(&mut editor, 125.0, 125.0);
    editor.pointer_down();
    assert!(editor.is_transforming());
    assert_eq!(
        editor.store().frame(&id).unwrap().transform_state(),
        TransformState::Translating
    );

    editor.set_mouse_position(225.0, 135.0);
    editor.pointer_drag();
    assert_eq!(editor.store().frame(&id).unwrap().position(), Point::new(200.0, 110.0));

    editor.pointer_release();
    assert!(!editor.is_transforming());
    assert_eq!(
        editor.store().frame(&id).unwrap().transform_state(),
        TransformState::NoTransform
    );
}

#[test]
fn test_translate_carries_mask_points() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);
    move_pointer(&mut editor, 110.0, 120.0);
    editor.respond_to_command(Command::NewPoint);

    drag(&mut editor, &[(130.0, 130.0), (150.0, 140.0), (160.0, 150.0)]);

    let frame = editor.store().frame(&id).unwrap();
    assert_eq!(frame.position(), Point::new(130.0, 120.0));
    assert_eq!(frame.mask_points(), &[MaskPoint::new(140.0, 140.0)]);
}

#[test]
fn test_scale_each_corner_anchors_opposite() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);

    // Top-right outwards: left and bottom edges stay
    drag(&mut editor, &[(150.0, 100.0), (170.0, 80.0)]);
    assert_eq!(editor.store().frame(&id).unwrap().rect(), Rect::new(100.0, 80.0, 170.0, 150.0));

    // Bottom-left inwards: top and right edges stay
    drag(&mut editor, &[(100.0, 150.0), (120.0, 140.0)]);
    assert_eq!(editor.store().frame(&id).unwrap().rect(), Rect::new(120.0, 80.0, 170.0, 140.0));
}

#[test]
fn test_scale_floor_is_min_size() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);

    // Bottom-right dragged past the top-left corner
    drag(&mut editor, &[(150.0, 150.0), (40.0, 20.0)]);

    let frame = editor.store().frame(&id).unwrap();
    assert_eq!(frame.rect(), Rect::new(100.0, 100.0, 110.0, 110.0));
}

#[test]
fn test_scale_cannot_cut_off_mask_points() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);
    move_pointer(&mut editor, 115.0, 120.0);
    editor.respond_to_command(Command::NewPoint);

    // Top-left dragged almost onto the bottom-right corner
    drag(&mut editor, &[(100.0, 100.0), (149.0, 149.0)]);

    let frame = editor.store().frame(&id).unwrap();
    assert_eq!(frame.rect(), Rect::new(115.0, 120.0, 150.0, 150.0));
    assert!(frame.contains(frame.mask_points()[0].position()));
}

#[test]
fn test_mask_point_drag_stays_inside_frame() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);
    move_pointer(&mut editor, 120.0, 130.0);
    editor.respond_to_command(Command::NewPoint);

    drag(&mut editor, &[(120.0, 130.0), (500.0, 130.0)]);

    let frame = editor.store().frame(&id).unwrap();
    assert_eq!(frame.mask_points(), &[MaskPoint::new(150.0, 130.0)]);
    assert_eq!(frame.rect(), Rect::new(100.0, 100.0, 150.0, 150.0));
}

#[test]
fn test_topmost_frame_wins() {
    let mut editor = setup_editor();
    let bottom = new_frame(&mut editor, 100.0, 100.0);
    let top = new_frame(&mut editor, 120.0, 120.0);

    drag(&mut editor, &[(130.0, 130.0), (160.0, 130.0)]);

    assert_eq!(editor.store().frame(&bottom).unwrap().position(), Point::new(100.0, 100.0));
    assert_eq!(editor.store().frame(&top).unwrap().position(), Point::new(150.0, 120.0));
}

#[test]
fn test_drag_on_empty_canvas_changes_nothing() {
    let mut editor = setup_editor();
    let id = new_frame(&mut editor, 100.0, 100.0);
    let before = editor.store().frame(&id).unwrap().geometry();

    drag(&mut editor, &[(300.0, 250.0), (20.0, 20.0)]);

    assert_eq!(editor.store().frame(&id).unwrap().geometry(), before);
    assert_eq!(editor.store().undo_description().as_deref(), Some("Add mask frame"));
}

#[test]
fn test_release_autosaves() {
    let mut editor = setup_editor();
    new_frame(&mut editor, 100.0, 100.0);
    let autosaves = editor.storage().autosave_count();

    drag(&mut editor, &[(125.0, 125.0), (135.0, 125.0)]);

    assert_eq!(editor.storage().autosave_count(), autosaves + 1);
}
