//! Save/load tests

use crate::helpers::{coords, editor_with};
use shapescape::persist::ParseErrorKind;
use shapescape::{Editor, EditorError};

#[test]
fn test_save_writes_offsets_from_bounds_origin() {
    let editor = editor_with(&[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)]);
    insta::assert_snapshot!(editor.save_to_string(), @r"
    0,0
    10,0
    10,10
    ");
}

#[test]
fn test_fractional_coordinates_keep_full_precision() {
    let editor = editor_with(&[(0.0, 0.0), (0.1, 2.5), (-1.75, 1e-3)]);
    insta::assert_snapshot!(editor.save_to_string(), @r"
    1.75,0
    1.85,2.5
    0,0.001
    ");
}

#[test]
fn test_round_trip_preserves_relative_offsets() {
    let original = editor_with(&[(13.0, 7.0), (40.0, 7.5), (-2.0, 100.0), (13.0, 7.0)]);
    let text = original.save_to_string();

    let mut loaded = Editor::default();
    assert_eq!(loaded.load_from_str(&text).unwrap(), 4);

    let a = coords(original.model());
    let b = coords(loaded.model());
    assert_eq!(a.len(), b.len());
    for window in a.windows(2).zip(b.windows(2)) {
        let (wa, wb) = window;
        assert!(((wa[1].0 - wa[0].0) - (wb[1].0 - wb[0].0)).abs() < 1e-9);
        assert!(((wa[1].1 - wa[0].1) - (wb[1].1 - wb[0].1)).abs() < 1e-9);
    }
    // bounding box starts one grid cell in
    assert_eq!(loaded.model().bounds().min.x, loaded.grid_size());
    assert_eq!(loaded.model().bounds().min.y, loaded.grid_size());
}

#[test]
fn test_loaded_vertices_undo_one_at_a_time() {
    let mut editor = Editor::default();
    editor.load_from_str("0,0\n5,5\n10,0").unwrap();
    let _ = editor.undo_last();
    assert_eq!(coords(editor.model()), vec![(30.0, 30.0), (35.0, 35.0)]);
}

#[test]
fn test_load_replaces_scene_and_resets_view() {
    let mut editor = editor_with(&[(1.0, 1.0), (2.0, 2.0)]);
    let _ = editor.pan_by(40.0, 40.0).unwrap();
    editor.load_from_str("7,7").unwrap();
    assert_eq!(coords(editor.model()), vec![(37.0, 37.0)]);
    assert_eq!(editor.queue().history().len(), 1);
    assert_eq!(editor.space().scale(), 1.0);
    assert!(editor.selected_vertices().is_empty());
}

#[test]
fn test_bad_line_aborts_load_without_touching_scene() {
    let mut editor = editor_with(&[(1.0, 1.0)]);
    let before = coords(editor.model());
    let err = editor.load_from_str("0,0\n1,2,3\n4,4").unwrap_err();
    match err {
        EditorError::Parse(parse) => {
            assert_eq!(parse.line, 2);
            assert_eq!(parse.content, "1,2,3");
            assert_eq!(parse.kind, ParseErrorKind::FieldCount(3));
            insta::assert_snapshot!(parse.to_string(), @r#"line 2: expected 2 fields, found 3 in "1,2,3""#);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
    assert_eq!(coords(editor.model()), before);
    assert_eq!(editor.queue().history().len(), 1);
}

#[test]
fn test_save_and_load_through_a_file() {
    let dir = std::env::temp_dir().join(format!("shapescape-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("triangle.cvg");

    let editor = editor_with(&[(10.0, 10.0), (20.0, 10.0), (15.0, 30.0)]);
    editor.save_to_path(&path).unwrap();

    let mut loaded = Editor::default();
    let _ = loaded.load_from_path(&path).unwrap();
    assert_eq!(
        coords(loaded.model()),
        vec![(30.0, 30.0), (40.0, 30.0), (35.0, 50.0)]
    );

    let missing = dir.join("missing.cvg");
    assert!(matches!(
        loaded.load_from_path(&missing),
        Err(EditorError::Io(_))
    ));
    assert_eq!(loaded.model().len(), 3);

    std::fs::remove_dir_all(&dir).unwrap();
}
