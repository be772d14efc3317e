use crate::error::{EditorError, EditorResult};
use crate::geometry::{Affine, Point, Rect, Vector};

/// Half the side length of the square used to grab a vertex.
pub const GRAB_HALF_EXTENT: f64 = 5.0;

/// Stable handle to a vertex. Handles are never reused within a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    position: Point,
}

impl Vertex {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y))
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn translate(&mut self, delta: Vector) {
        self.position = self.position + delta;
    }

    /// Hit-test square centered on the vertex, always derived from its position.
    pub fn grab_box(&self) -> Rect {
        Rect::from_center_half_extent(self.position, GRAB_HALF_EXTENT)
    }
}

/// A vertex taken out of the model together with the place it occupied.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RemovedVertex {
    pub id: VertexId,
    pub order_index: usize,
    pub vertex: Vertex,
}

/// Ordered vertex arena. Order is polyline connectivity.
#[derive(Clone, Debug, Default)]
pub struct Model {
    slots: Vec<Option<Vertex>>,
    order: Vec<VertexId>,
    transform: Affine,
    bounds: Rect,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn ids(&self) -> &[VertexId] {
        &self.order
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.get(id).map(|v| (id, v)))
    }

    pub fn model_transform(&self) -> Affine {
        self.transform
    }

    /// Position after the model transform, the space bounds are kept in.
    pub fn display_position(&self, id: VertexId) -> Option<Point> {
        self.get(id).map(|v| self.transform.apply(v.position()))
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        let display = self.transform.apply(vertex.position());
        let id = VertexId(self.slots.len());
        self.slots.push(Some(vertex));
        self.order.push(id);
        if self.order.len() == 1 || !self.bounds.contains(display) {
            self.bounds = self.generate_bounds();
        }
        id
    }

    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        self.take_vertex(id).map(|removed| removed.vertex)
    }

    pub(crate) fn take_vertex(&mut self, id: VertexId) -> Option<RemovedVertex> {
        let order_index = self.order.iter().position(|&v| v == id)?;
        let vertex = self.slots.get_mut(id.0)?.take()?;
        self.order.remove(order_index);
        self.bounds = self.generate_bounds();
        Some(RemovedVertex {
            id,
            order_index,
            vertex,
        })
    }

    pub(crate) fn restore_vertex(&mut self, removed: RemovedVertex) {
        let RemovedVertex {
            id,
            order_index,
            vertex,
        } = removed;
        let Some(slot) = self.slots.get_mut(id.0) else {
            tracing::warn!(?id, "restoring a vertex that never belonged to this model");
            return;
        };
        *slot = Some(vertex);
        let at = order_index.min(self.order.len());
        self.order.insert(at, id);
        self.bounds = self.generate_bounds();
    }

    pub fn set_position(&mut self, id: VertexId, position: Point) -> bool {
        let Some(vertex) = self.slots.get_mut(id.0).and_then(Option::as_mut) else {
            return false;
        };
        vertex.set_position(position);
        self.bounds = self.generate_bounds();
        true
    }

    pub(crate) fn restore_positions(&mut self, positions: &[(VertexId, Point)]) {
        for &(id, position) in positions {
            if let Some(vertex) = self.slots.get_mut(id.0).and_then(Option::as_mut) {
                vertex.set_position(position);
            }
        }
        self.bounds = self.generate_bounds();
    }

    pub fn translate_vertices(&mut self, ids: &[VertexId], delta: Vector) {
        for &id in ids {
            if let Some(vertex) = self.slots.get_mut(id.0).and_then(Option::as_mut) {
                vertex.translate(delta);
            }
        }
        self.bounds = self.generate_bounds();
    }

    /// Bakes `t` into every stored position. Distinct from changing the view.
    pub fn transform(&mut self, t: &Affine) {
        for vertex in self.slots.iter_mut().flatten() {
            vertex.set_position(t.apply(vertex.position()));
        }
        self.bounds = self.generate_bounds();
    }

    /// Appends a translation to the model transform, applied before the
    /// existing transform.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform * Affine::translation(dx, dy);
        self.bounds = self.generate_bounds();
    }

    /// Factors that would scale the current bounds to `target_width` x
    /// `target_height`.
    pub fn scale_factors_to(&self, target_width: f64, target_height: f64) -> EditorResult<(f64, f64)> {
        let width = self.bounds.width();
        let height = self.bounds.height();
        if width == 0.0 || height == 0.0 {
            return Err(EditorError::DegenerateScale { width, height });
        }
        let sx = target_width / width;
        let sy = target_height / height;
        validate_scale(sx, sy)?;
        Ok((sx, sy))
    }

    /// Multiplies every stored coordinate component-wise. Rejected factors
    /// leave every vertex untouched.
    pub fn apply_scale(&mut self, sx: f64, sy: f64) -> EditorResult<()> {
        self.check_scale(sx, sy)?;
        for vertex in self.slots.iter_mut().flatten() {
            vertex.set_position(Point::new(vertex.x() * sx, vertex.y() * sy));
        }
        self.bounds = self.generate_bounds();
        Ok(())
    }

    /// Fails if the factors are unusable or any scaled coordinate would
    /// overflow.
    pub fn check_scale(&self, sx: f64, sy: f64) -> EditorResult<()> {
        validate_scale(sx, sy)?;
        let overflows = self
            .slots
            .iter()
            .flatten()
            .any(|v| !Point::new(v.x() * sx, v.y() * sy).is_finite());
        if overflows {
            return Err(EditorError::InvalidScale { sx, sy });
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
        self.transform = Affine::IDENTITY;
        self.bounds = Rect::ZERO;
    }

    /// Tracks the extremal vertices in one pass; ties keep the first one seen.
    fn generate_bounds(&self) -> Rect {
        let mut points = self
            .vertices()
            .map(|(_, v)| self.transform.apply(v.position()));
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        let (mut left, mut right, mut low, mut high) = (first, first, first, first);
        for p in points {
            if p.x < left.x {
                left = p;
            }
            if p.x > right.x {
                right = p;
            }
            if p.y < low.y {
                low = p;
            }
            if p.y > high.y {
                high = p;
            }
        }
        Rect {
            min: Point::new(left.x, low.y),
            max: Point::new(right.x, high.y),
        }
    }
}

fn validate_scale(sx: f64, sy: f64) -> EditorResult<()> {
    if !sx.is_finite() || !sy.is_finite() || sx == 0.0 || sy == 0.0 {
        return Err(EditorError::InvalidScale { sx, sy });
    }
    Ok(())
}
