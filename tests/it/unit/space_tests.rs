//! Coordinate space tests

use crate::helpers::assert_close;
use shapescape::EditorError;
use shapescape::geometry::{Affine, Point};
use shapescape::space::CoordinateSpace;

#[test]
fn test_round_trip_over_many_points() {
    let mut space = CoordinateSpace::new();
    space.set_world(Affine::translation(12.0, 64.0)).unwrap();
    space.zoom(0.37, Point::new(300.0, 10.0)).unwrap();
    space.pan(-81.25, 4.5).unwrap();
    space.zoom(3.1, Point::new(-20.0, 500.0)).unwrap();

    for i in -10..10 {
        let p = Point::new(i as f64 * 17.3, (i * i) as f64 * -2.9);
        let screen = space.world_to_view(&[p])[0];
        assert_close(space.view_to_world(screen).unwrap(), p);
    }
}

#[test]
fn test_model_transform_round_trip() {
    let mut space = CoordinateSpace::new();
    space.zoom(1.5, Point::new(40.0, 40.0)).unwrap();
    let model = Affine::translation(-7.0, 3.0) * Affine::scale_xy(2.0, 0.5);
    let p = Point::new(11.0, -4.0);
    let screen = space.model_to_screen(&model, &[p])[0];
    assert_close(space.screen_to_model(&model, screen).unwrap(), p);
}

#[test]
fn test_singular_model_transform_fails_inversion() {
    let space = CoordinateSpace::new();
    let flat = Affine::scale_xy(1.0, 0.0);
    assert!(matches!(
        space.screen_to_model(&flat, Point::new(1.0, 1.0)),
        Err(EditorError::NonInvertibleTransform { .. })
    ));
}

#[test]
fn test_zoom_limits_hold_across_repeated_zooms() {
    let mut space = CoordinateSpace::new();
    for _ in 0..50 {
        space.zoom(1.25, Point::new(100.0, 100.0)).unwrap();
    }
    assert!((space.scale() - 8.0).abs() < 1e-9);
    for _ in 0..100 {
        space.zoom(0.8, Point::new(100.0, 100.0)).unwrap();
    }
    assert!((space.scale() - 0.1).abs() < 1e-9);
}

#[test]
fn test_reset_view_keeps_world() {
    let mut space = CoordinateSpace::new();
    space.set_world(Affine::translation(5.0, 5.0)).unwrap();
    space.pan(10.0, 10.0).unwrap();
    space.reset_view();
    assert_eq!(space.view(), Affine::IDENTITY);
    assert_eq!(space.world(), Affine::translation(5.0, 5.0));
}
