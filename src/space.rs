//! Screen <-> model coordinate mapping.
//!
//! A model point reaches the screen through `world ∘ view ∘ model`: the model
//! transform first, then the view (pan/zoom), then the world transform that
//! places the drawing surface inside its window. The composed transform is
//! kept invertible at all times; updates that would break that are rejected
//! before they are applied.

use crate::error::{EditorError, EditorResult};
use crate::geometry::{Affine, Point, Vector};

pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
pub const DEFAULT_MAX_ZOOM: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateSpace {
    world: Affine,
    view: Affine,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self {
            world: Affine::IDENTITY,
            view: Affine::IDENTITY,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl CoordinateSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        if min_zoom.is_finite() && max_zoom.is_finite() && 0.0 < min_zoom && min_zoom <= max_zoom {
            self.min_zoom = min_zoom;
            self.max_zoom = max_zoom;
        } else {
            tracing::warn!(min_zoom, max_zoom, "ignoring invalid zoom limits");
        }
        self
    }

    pub fn world(&self) -> Affine {
        self.world
    }

    pub fn view(&self) -> Affine {
        self.view
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// `world ∘ view`.
    pub fn composed(&self) -> Affine {
        self.world * self.view
    }

    /// Current zoom factor of the view.
    pub fn scale(&self) -> f64 {
        self.view.uniform_scale()
    }

    pub fn world_to_view(&self, points: &[Point]) -> Vec<Point> {
        let t = self.composed();
        points.iter().map(|&p| t.apply(p)).collect()
    }

    pub fn model_to_screen(&self, model: &Affine, points: &[Point]) -> Vec<Point> {
        let t = self.composed() * *model;
        points.iter().map(|&p| t.apply(p)).collect()
    }

    pub fn view_to_world(&self, point: Point) -> EditorResult<Point> {
        invert(&self.composed()).map(|inv| inv.apply(point))
    }

    pub fn screen_to_model(&self, model: &Affine, point: Point) -> EditorResult<Point> {
        invert(&(self.composed() * *model)).map(|inv| inv.apply(point))
    }

    /// Screen-space displacement expressed in view-output coordinates.
    pub fn screen_delta_to_view(&self, delta: Vector) -> EditorResult<Vector> {
        invert(&self.world).map(|inv| inv.apply_vector(delta))
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> EditorResult<()> {
        let delta = self.screen_delta_to_view(Vector::new(dx, dy))?;
        let candidate = Affine::translation(delta.dx, delta.dy) * self.view;
        self.commit_view(candidate)
    }

    /// Zooms about a screen-space pivot, which stays fixed on screen.
    ///
    /// The pivot is translated to the origin, scaled, and translated back.
    /// The factor actually applied is clamped so the overall scale stays
    /// within the zoom limits; it is returned.
    pub fn zoom(&mut self, factor: f64, pivot: Point) -> EditorResult<f64> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EditorError::InvalidZoom(factor));
        }
        let current = self.scale();
        let target = (current * factor).clamp(self.min_zoom, self.max_zoom);
        let effective = target / current;
        let pivot = invert(&self.world)?.apply(pivot);
        let about_pivot = Affine::translation(pivot.x, pivot.y)
            * Affine::scale(effective)
            * Affine::translation(-pivot.x, -pivot.y);
        self.commit_view(about_pivot * self.view)?;
        Ok(effective)
    }

    pub fn set_world(&mut self, world: Affine) -> EditorResult<()> {
        let composed = world * self.view;
        if !composed.is_invertible() {
            return Err(reject(&composed));
        }
        self.world = world;
        Ok(())
    }

    pub fn reset_view(&mut self) {
        self.view = Affine::IDENTITY;
    }

    fn commit_view(&mut self, candidate: Affine) -> EditorResult<()> {
        let composed = self.world * candidate;
        if !composed.is_invertible() || candidate.uniform_scale() == 0.0 {
            return Err(reject(&composed));
        }
        self.view = candidate;
        Ok(())
    }
}

fn invert(t: &Affine) -> EditorResult<Affine> {
    t.inverse().ok_or_else(|| reject(t))
}

fn reject(t: &Affine) -> EditorError {
    let determinant = t.determinant();
    tracing::warn!(determinant, "rejecting non-invertible transform");
    EditorError::NonInvertibleTransform { determinant }
}
