//! Builders and assertions shared by the test modules.

use shapescape::geometry::Point;
use shapescape::model::{Model, VertexId};
use shapescape::{Editor, PointerButton, Settings};

/// Builder for an editor pre-populated with vertices.
///
/// ```ignore
/// let editor = TestEditorBuilder::new()
///     .with_vertex(10.0, 10.0)
///     .with_snap(true)
///     .build();
/// ```
pub struct TestEditorBuilder {
    settings: Settings,
    vertices: Vec<Point>,
}

impl Default for TestEditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEditorBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            vertices: Vec::new(),
        }
    }

    pub fn with_vertex(mut self, x: f64, y: f64) -> Self {
        self.vertices.push(Point::new(x, y));
        self
    }

    pub fn with_vertices(mut self, points: &[(f64, f64)]) -> Self {
        self.vertices
            .extend(points.iter().map(|&(x, y)| Point::new(x, y)));
        self
    }

    pub fn with_snap(mut self, snap: bool) -> Self {
        self.settings.snap_to_grid = snap;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.settings.history_limit = limit;
        self
    }

    pub fn build(self) -> Editor {
        let mut editor = Editor::new(&self.settings);
        for p in self.vertices {
            editor.create_vertex_at(p);
        }
        editor
    }
}

pub fn editor_with(points: &[(f64, f64)]) -> Editor {
    TestEditorBuilder::new().with_vertices(points).build()
}

/// Vertex positions in model order.
pub fn positions(model: &Model) -> Vec<(VertexId, Point)> {
    model.vertices().map(|(id, v)| (id, v.position())).collect()
}

pub fn coords(model: &Model) -> Vec<(f64, f64)> {
    model
        .vertices()
        .map(|(_, v)| (v.x(), v.y()))
        .collect()
}

/// Press, move through `path`, release, all with the same button.
pub fn drag(editor: &mut Editor, button: PointerButton, from: (f64, f64), path: &[(f64, f64)]) {
    let at = |(x, y): (f64, f64)| Point::new(x, y);
    let _ = editor
        .pointer_pressed(button, at(from), false)
        .expect("press");
    for &p in path {
        let _ = editor.pointer_moved(at(p), false).expect("move");
    }
    let end = path.last().copied().unwrap_or(from);
    let _ = editor
        .pointer_released(button, at(end), false)
        .expect("release");
}

pub fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
        "{a:?} != {b:?}"
    );
}
