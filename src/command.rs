//! Reversible model mutations.
//!
//! Commands hold vertex handles rather than copies, so undo acts on the same
//! vertices that execute touched.

use crate::error::{EditorError, EditorResult};
use crate::geometry::{Point, Vector};
use crate::model::{Model, RemovedVertex, Vertex, VertexId};

pub trait ReversibleCommand {
    fn execute(&mut self, model: &mut Model);
    fn undo(&mut self, model: &mut Model);
    fn label(&self) -> &'static str;
}

#[derive(Clone, Debug, PartialEq)]
pub struct CreateVertex {
    position: Point,
    created: Option<VertexId>,
}

impl CreateVertex {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            created: None,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Handle of the vertex this command created, once executed.
    pub fn vertex(&self) -> Option<VertexId> {
        self.created
    }
}

impl ReversibleCommand for CreateVertex {
    fn execute(&mut self, model: &mut Model) {
        if self.created.is_some_and(|id| model.contains(id)) {
            return;
        }
        self.created = Some(model.add_vertex(Vertex::new(self.position)));
    }

    fn undo(&mut self, model: &mut Model) {
        if let Some(id) = self.created.take() {
            model.remove_vertex(id);
        }
    }

    fn label(&self) -> &'static str {
        "Create vertex"
    }
}

/// Moves a set of vertices by pointer displacement.
///
/// During a gesture `preview` is called for every pointer move and applies
/// only the delta since the previous call. `execute` applies whatever delta
/// is still outstanding. `undo` puts every vertex back where it was before
/// the first movement.
#[derive(Clone, Debug, PartialEq)]
pub struct Drag {
    vertices: Vec<VertexId>,
    start: Point,
    end: Point,
    total: Vector,
    before: Vec<(VertexId, Point)>,
}

impl Drag {
    pub fn new(vertices: Vec<VertexId>, anchor: Point) -> Self {
        Self {
            vertices,
            start: anchor,
            end: anchor,
            total: Vector::ZERO,
            before: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn total(&self) -> Vector {
        self.total
    }

    pub fn set_end(&mut self, end: Point) {
        self.end = end;
    }

    pub fn preview(&mut self, to: Point, model: &mut Model) {
        self.end = to;
        self.step(model);
    }

    fn step(&mut self, model: &mut Model) {
        let delta = self.end - self.start;
        self.start = self.end;
        if delta.is_zero() {
            return;
        }
        if self.before.is_empty() {
            self.before = self
                .vertices
                .iter()
                .filter_map(|&id| model.get(id).map(|v| (id, v.position())))
                .collect();
        }
        self.total += delta;
        model.translate_vertices(&self.vertices, delta);
    }
}

impl ReversibleCommand for Drag {
    fn execute(&mut self, model: &mut Model) {
        self.step(model);
    }

    fn undo(&mut self, model: &mut Model) {
        if self.before.is_empty() {
            return;
        }
        model.restore_positions(&self.before);
        self.before.clear();
        self.total = Vector::ZERO;
    }

    fn label(&self) -> &'static str {
        "Drag"
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeleteVertices {
    targets: Vec<VertexId>,
    removed: Vec<RemovedVertex>,
}

impl DeleteVertices {
    pub fn new(targets: Vec<VertexId>) -> Self {
        Self {
            targets,
            removed: Vec::new(),
        }
    }

    pub fn targets(&self) -> &[VertexId] {
        &self.targets
    }
}

impl ReversibleCommand for DeleteVertices {
    fn execute(&mut self, model: &mut Model) {
        for &id in &self.targets {
            if let Some(removed) = model.take_vertex(id) {
                self.removed.push(removed);
            }
        }
    }

    fn undo(&mut self, model: &mut Model) {
        // each recorded index is relative to the order at its removal
        while let Some(removed) = self.removed.pop() {
            model.restore_vertex(removed);
        }
    }

    fn label(&self) -> &'static str {
        "Delete vertices"
    }
}

/// Component-wise scale of every vertex. Undo restores the exact prior
/// positions.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleVertices {
    sx: f64,
    sy: f64,
    before: Vec<(VertexId, Point)>,
}

impl ScaleVertices {
    pub fn new(sx: f64, sy: f64) -> EditorResult<Self> {
        if !sx.is_finite() || !sy.is_finite() || sx == 0.0 || sy == 0.0 {
            return Err(EditorError::InvalidScale { sx, sy });
        }
        Ok(Self {
            sx,
            sy,
            before: Vec::new(),
        })
    }

    pub fn factors(&self) -> (f64, f64) {
        (self.sx, self.sy)
    }
}

impl ReversibleCommand for ScaleVertices {
    fn execute(&mut self, model: &mut Model) {
        let before: Vec<(VertexId, Point)> =
            model.vertices().map(|(id, v)| (id, v.position())).collect();
        match model.apply_scale(self.sx, self.sy) {
            Ok(()) => self.before = before,
            Err(err) => tracing::warn!(%err, "scale skipped"),
        }
    }

    fn undo(&mut self, model: &mut Model) {
        model.restore_positions(&self.before);
        self.before.clear();
    }

    fn label(&self) -> &'static str {
        "Scale"
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    CreateVertex(CreateVertex),
    Drag(Drag),
    DeleteVertices(DeleteVertices),
    ScaleVertices(ScaleVertices),
}

impl ReversibleCommand for Command {
    fn execute(&mut self, model: &mut Model) {
        match self {
            Command::CreateVertex(c) => c.execute(model),
            Command::Drag(c) => c.execute(model),
            Command::DeleteVertices(c) => c.execute(model),
            Command::ScaleVertices(c) => c.execute(model),
        }
    }

    fn undo(&mut self, model: &mut Model) {
        match self {
            Command::CreateVertex(c) => c.undo(model),
            Command::Drag(c) => c.undo(model),
            Command::DeleteVertices(c) => c.undo(model),
            Command::ScaleVertices(c) => c.undo(model),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Command::CreateVertex(c) => c.label(),
            Command::Drag(c) => c.label(),
            Command::DeleteVertices(c) => c.label(),
            Command::ScaleVertices(c) => c.label(),
        }
    }
}

impl From<CreateVertex> for Command {
    fn from(c: CreateVertex) -> Self {
        Command::CreateVertex(c)
    }
}

impl From<Drag> for Command {
    fn from(c: Drag) -> Self {
        Command::Drag(c)
    }
}

impl From<DeleteVertices> for Command {
    fn from(c: DeleteVertices) -> Self {
        Command::DeleteVertices(c)
    }
}

impl From<ScaleVertices> for Command {
    fn from(c: ScaleVertices) -> Self {
        Command::ScaleVertices(c)
    }
}
