//! Pointer gesture workflows

use crate::helpers::{TestEditorBuilder, coords, drag, editor_with, positions};
use shapescape::command::Command;
use shapescape::geometry::{Affine, Point, Rect};
use shapescape::{Change, PointerButton};

#[test]
fn test_one_history_entry_per_drag_gesture() {
    let mut editor = editor_with(&[(50.0, 50.0)]);
    let path: Vec<(f64, f64)> = (1..=20).map(|i| (50.0 + i as f64, 50.0)).collect();
    drag(&mut editor, PointerButton::Secondary, (50.0, 50.0), &path);

    assert_eq!(editor.queue().history().len(), 2);
    assert!(matches!(editor.queue().last(), Some(Command::Drag(_))));
    assert_eq!(coords(editor.model()), vec![(70.0, 50.0)]);
}

#[test]
fn test_zero_length_drag_is_not_recorded() {
    let mut editor = editor_with(&[(50.0, 50.0)]);
    drag(&mut editor, PointerButton::Secondary, (50.0, 50.0), &[(50.0, 50.0)]);
    assert_eq!(editor.queue().history().len(), 1);
}

#[test]
fn test_secondary_press_on_empty_canvas_does_not_drag() {
    let mut editor = editor_with(&[(50.0, 50.0)]);
    let _ = editor
        .pointer_pressed(PointerButton::Secondary, Point::new(300.0, 300.0), false)
        .unwrap();
    assert!(!editor.is_dragging());
}

#[test]
fn test_single_selection_drags_from_anywhere() {
    let mut editor = editor_with(&[(50.0, 50.0), (100.0, 100.0)]);
    let first = editor.model().ids()[0];
    let _ = editor.select(first);
    drag(&mut editor, PointerButton::Secondary, (300.0, 300.0), &[(310.0, 290.0)]);
    assert_eq!(coords(editor.model()), vec![(60.0, 40.0), (100.0, 100.0)]);
}

#[test]
fn test_drag_under_zoom_moves_in_model_units() {
    let mut editor = editor_with(&[(10.0, 10.0)]);
    let _ = editor.zoom_at(2.0, Point::ZERO).unwrap();
    // the vertex is drawn at (20, 20) now
    drag(&mut editor, PointerButton::Secondary, (20.0, 20.0), &[(40.0, 20.0)]);
    assert_eq!(coords(editor.model()), vec![(20.0, 10.0)]);
}

#[test]
fn test_box_select_in_panned_canvas_world() {
    let mut editor = editor_with(&[(10.0, 10.0), (60.0, 10.0)]);
    let _ = editor.set_world(Affine::translation(100.0, 0.0)).unwrap();
    drag(&mut editor, PointerButton::Primary, (100.0, 0.0), &[(130.0, 30.0)]);
    assert_eq!(editor.selected_vertices(), vec![editor.model().ids()[0]]);
}

#[test]
fn test_primary_press_clears_selection() {
    let mut editor = editor_with(&[(10.0, 10.0)]);
    let id = editor.model().ids()[0];
    let _ = editor.select(id);
    let change = editor
        .pointer_pressed(PointerButton::Primary, Point::new(400.0, 400.0), false)
        .unwrap();
    assert_eq!(change, Change::Selection);
    assert!(editor.selected_vertices().is_empty());
}

#[test]
fn test_snapped_drag_lands_on_grid() {
    let mut editor = TestEditorBuilder::new()
        .with_snap(true)
        .with_vertex(30.0, 30.0)
        .build();
    drag(&mut editor, PointerButton::Secondary, (31.0, 29.0), &[(58.0, 64.0)]);
    assert_eq!(coords(editor.model()), vec![(60.0, 60.0)]);
}

#[test]
fn test_undo_during_drag_reverts_whole_gesture() {
    let mut editor = editor_with(&[(0.0, 0.0)]);
    let _ = editor
        .pointer_pressed(PointerButton::Secondary, Point::ZERO, false)
        .unwrap();
    let _ = editor.pointer_moved(Point::new(25.0, 0.0), false).unwrap();
    assert_eq!(editor.undo_last(), Change::Model);
    assert!(!editor.is_dragging());
    assert_eq!(coords(editor.model()), vec![(0.0, 0.0)]);
    assert_eq!(editor.queue().history().len(), 1);
}

#[test]
fn test_undo_after_zoomed_drag_is_bit_identical() {
    let mut editor = editor_with(&[(0.5, 0.7), (13.3, -2.1)]);
    let before = positions(editor.model());
    let _ = editor.zoom_at(1.1, Point::new(3.0, 7.0)).unwrap();

    let rect = Rect::from_min_max(Point::new(-50.0, -50.0), Point::new(50.0, 50.0));
    let _ = editor.select_within(rect);
    let path = [(10.1, 3.3), (17.45, -0.2), (21.9, 8.85), (4.05, 12.6)];
    drag(&mut editor, PointerButton::Secondary, (0.55, 0.77), &path);
    assert_eq!(editor.queue().history().len(), 3);

    let _ = editor.undo_last();
    assert_eq!(positions(editor.model()), before);
}
