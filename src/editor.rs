//! The editing session: model, history, coordinate space and selection.
//!
//! Mutating calls return a [`Change`] instead of triggering a redraw; the
//! caller decides when to repaint.

use std::collections::BTreeSet;

use crate::command::{Command, CreateVertex, DeleteVertices, Drag, ScaleVertices};
use crate::error::{EditorError, EditorResult};
use crate::geometry::{Affine, Point, Rect, Vector};
use crate::gesture::Gesture;
use crate::model::{Model, VertexId};
use crate::queue::CommandQueue;
use crate::settings::Settings;
use crate::space::CoordinateSpace;

/// What a call changed, ordered by how much needs to be redrawn.
#[must_use]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Change {
    #[default]
    None,
    Selection,
    View,
    Model,
}

impl Change {
    pub fn needs_redraw(self) -> bool {
        self != Change::None
    }

    pub fn merge(self, other: Change) -> Change {
        self.max(other)
    }
}

#[derive(Debug)]
pub struct Editor {
    pub(crate) model: Model,
    pub(crate) queue: CommandQueue,
    pub(crate) space: CoordinateSpace,
    pub(crate) selection: BTreeSet<VertexId>,
    pub(crate) gesture: Gesture,
    grid_size: f64,
    snap_to_grid: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Editor {
    pub fn new(settings: &Settings) -> Self {
        Self {
            model: Model::new(),
            queue: CommandQueue::new(settings.history_limit),
            space: CoordinateSpace::new().with_zoom_limits(settings.min_zoom, settings.max_zoom),
            selection: BTreeSet::new(),
            gesture: Gesture::Idle,
            grid_size: settings.grid_size,
            snap_to_grid: settings.snap_to_grid,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    pub fn space(&self) -> &CoordinateSpace {
        &self.space
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn set_grid_size(&mut self, grid_size: f64) {
        if grid_size > 0.0 && grid_size.is_finite() {
            self.grid_size = grid_size;
        }
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.snap_to_grid = snap;
    }

    /// Grid snapping for a model-space point, when enabled or forced.
    pub fn snap(&self, point: Point, force: bool) -> Point {
        if force || self.snap_to_grid {
            point.snapped(self.grid_size)
        } else {
            point
        }
    }

    pub fn screen_to_model(&self, screen: Point) -> EditorResult<Point> {
        self.space
            .screen_to_model(&self.model.model_transform(), screen)
    }

    pub fn model_to_screen(&self, points: &[Point]) -> Vec<Point> {
        self.space
            .model_to_screen(&self.model.model_transform(), points)
    }

    pub fn create_vertex_at(&mut self, point: Point) -> Option<VertexId> {
        self.queue.enqueue(CreateVertex::new(point));
        self.queue.run_next(&mut self.model);
        match self.queue.last() {
            Some(Command::CreateVertex(created)) => created.vertex(),
            _ => None,
        }
    }

    pub fn undo_last(&mut self) -> Change {
        let mut change = self.cancel_gesture();
        if let Some(label) = self.queue.undo_last(&mut self.model) {
            tracing::debug!(label, "undo");
            self.prune_selection();
            change = Change::Model;
        }
        change
    }

    pub fn selected_vertices(&self) -> Vec<VertexId> {
        self.selection.iter().copied().collect()
    }

    pub fn is_selected(&self, id: VertexId) -> bool {
        self.selection.contains(&id)
    }

    pub fn clear_selection(&mut self) -> Change {
        if self.selection.is_empty() {
            return Change::None;
        }
        self.selection.clear();
        Change::Selection
    }

    pub fn select(&mut self, id: VertexId) -> Change {
        if self.model.contains(id) && self.selection.insert(id) {
            Change::Selection
        } else {
            Change::None
        }
    }

    pub fn select_within(&mut self, rect: Rect) -> Change {
        let before = self.selection.len();
        self.selection.extend(self.vertices_within(rect));
        if self.selection.len() == before {
            Change::None
        } else {
            Change::Selection
        }
    }

    /// First vertex, in model order, whose grab box contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<VertexId> {
        self.model
            .vertices()
            .find(|(_, v)| v.grab_box().contains(point))
            .map(|(id, _)| id)
    }

    pub fn hits_at(&self, point: Point) -> Vec<VertexId> {
        self.model
            .vertices()
            .filter(|(_, v)| v.grab_box().contains(point))
            .map(|(id, _)| id)
            .collect()
    }

    /// Vertices whose entire grab box lies inside `rect`.
    pub fn vertices_within(&self, rect: Rect) -> Vec<VertexId> {
        self.model
            .vertices()
            .filter(|(_, v)| rect.contains_rect(&v.grab_box()))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn delete_selected(&mut self) -> Change {
        if self.selection.is_empty() {
            return Change::None;
        }
        let targets = self.selected_vertices();
        tracing::debug!(count = targets.len(), "deleting selection");
        self.queue.enqueue(DeleteVertices::new(targets));
        self.queue.run_next(&mut self.model);
        self.selection.clear();
        Change::Model
    }

    /// Resizes the shape so its bounding box becomes `width` x `height`.
    pub fn scale_to(&mut self, width: f64, height: f64) -> EditorResult<Change> {
        let (sx, sy) = self.model.scale_factors_to(width, height)?;
        self.model.check_scale(sx, sy)?;
        self.queue.enqueue(ScaleVertices::new(sx, sy)?);
        self.queue.run_next(&mut self.model);
        tracing::debug!(sx, sy, "scaled to target bounds");
        Ok(Change::Model)
    }

    /// Moves the whole shape so its bounding box starts one grid cell from
    /// the origin, as a single undoable drag.
    pub fn move_to_origin(&mut self) -> Change {
        if self.model.is_empty() {
            return Change::None;
        }
        let from = self.model.bounds().min;
        let to = Point::new(self.grid_size, self.grid_size);
        let Ok(offset) = self.display_delta_to_model(to - from) else {
            return Change::None;
        };
        let mut drag = Drag::new(self.model.ids().to_vec(), from);
        drag.set_end(from + offset);
        self.queue.enqueue(drag);
        self.queue.run_next(&mut self.model);
        Change::Model
    }

    /// Display-space displacement expressed in stored vertex coordinates.
    fn display_delta_to_model(&self, delta: Vector) -> EditorResult<Vector> {
        let t = self.model.model_transform();
        t.inverse()
            .map(|inv| inv.apply_vector(delta))
            .ok_or(EditorError::NonInvertibleTransform {
                determinant: t.determinant(),
            })
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> EditorResult<Change> {
        self.space.pan(dx, dy)?;
        Ok(Change::View)
    }

    pub fn zoom_at(&mut self, factor: f64, screen_pivot: Point) -> EditorResult<Change> {
        let applied = self.space.zoom(factor, screen_pivot)?;
        Ok(if applied == 1.0 { Change::None } else { Change::View })
    }

    pub fn set_world(&mut self, world: Affine) -> EditorResult<Change> {
        if world == self.space.world() {
            return Ok(Change::None);
        }
        self.space.set_world(world)?;
        Ok(Change::View)
    }

    pub fn reset_view(&mut self) -> Change {
        self.space.reset_view();
        Change::View
    }

    pub fn new_scene(&mut self) -> Change {
        self.gesture = Gesture::Idle;
        self.model.clear();
        self.queue.clear();
        self.selection.clear();
        self.space.reset_view();
        tracing::info!("new scene");
        Change::Model
    }

    fn prune_selection(&mut self) {
        let model = &self.model;
        self.selection.retain(|&id| model.contains(id));
    }
}
