//! Model and bounding box tests

use shapescape::EditorError;
use shapescape::geometry::{Affine, Point, Rect, Vector};
use shapescape::model::{Model, Vertex};

fn tight_box(points: &[(f64, f64)]) -> Rect {
    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    Rect::from_min_max(Point::new(min_x, min_y), Point::new(max_x, max_y))
}

#[test]
fn test_bounds_match_tight_box_as_vertices_arrive() {
    let points = [
        (5.0, 5.0),
        (-3.0, 8.0),
        (2.0, -11.5),
        (40.0, 0.0),
        (1.0, 1.0),
        (40.0, 90.0),
    ];
    let mut model = Model::new();
    for (n, &(x, y)) in points.iter().enumerate() {
        model.add_vertex(Vertex::at(x, y));
        assert_eq!(model.bounds(), tight_box(&points[..=n]));
    }
}

#[test]
fn test_bounds_after_removals_down_to_empty() {
    let mut model = Model::new();
    let ids: Vec<_> = [(0.0, 0.0), (10.0, -5.0), (3.0, 7.0)]
        .iter()
        .map(|&(x, y)| model.add_vertex(Vertex::at(x, y)))
        .collect();
    model.remove_vertex(ids[1]);
    assert_eq!(model.bounds(), tight_box(&[(0.0, 0.0), (3.0, 7.0)]));
    model.remove_vertex(ids[0]);
    model.remove_vertex(ids[2]);
    assert_eq!(model.bounds(), Rect::ZERO);
    assert!(model.remove_vertex(ids[2]).is_none());
}

#[test]
fn test_handles_are_not_reused() {
    let mut model = Model::new();
    let a = model.add_vertex(Vertex::at(0.0, 0.0));
    model.remove_vertex(a);
    let b = model.add_vertex(Vertex::at(0.0, 0.0));
    assert_ne!(a, b);
    assert!(!model.contains(a));
}

#[test]
fn test_bounds_follow_model_transform() {
    let mut model = Model::new();
    model.add_vertex(Vertex::at(1.0, 1.0));
    model.add_vertex(Vertex::at(2.0, 3.0));
    model.translate(-1.0, 4.0);
    assert_eq!(model.bounds().min, Point::new(0.0, 5.0));
    model.transform(&Affine::scale(2.0));
    assert_eq!(model.bounds().max, Point::new(3.0, 10.0));
}

#[test]
fn test_scale_to_target_then_reject_flat_box() {
    let mut model = Model::new();
    model.add_vertex(Vertex::at(0.0, 0.0));
    model.add_vertex(Vertex::at(20.0, 10.0));
    let (sx, sy) = model.scale_factors_to(50.0, 50.0).unwrap();
    model.apply_scale(sx, sy).unwrap();
    assert_eq!(model.bounds().max, Point::new(50.0, 50.0));

    let mut flat = Model::new();
    let id = flat.add_vertex(Vertex::at(4.0, 4.0));
    flat.add_vertex(Vertex::at(4.0, 9.0));
    let err = flat.scale_factors_to(10.0, 10.0).unwrap_err();
    assert!(matches!(err, EditorError::DegenerateScale { width, .. } if width == 0.0));
    assert_eq!(flat.get(id).unwrap().position(), Point::new(4.0, 4.0));
}

#[test]
fn test_translate_vertices_ignores_stale_handles() {
    let mut model = Model::new();
    let a = model.add_vertex(Vertex::at(0.0, 0.0));
    let b = model.add_vertex(Vertex::at(1.0, 1.0));
    model.remove_vertex(a);
    model.translate_vertices(&[a, b], Vector::new(2.0, 2.0));
    assert_eq!(model.get(b).unwrap().position(), Point::new(3.0, 3.0));
    assert_eq!(model.len(), 1);
}
