//! Pointer gesture state machine.
//!
//! ```text
//! Idle -> BoxSelect   (primary press)
//! Idle -> Panning     (middle press)
//! Idle -> Dragging    (secondary press on or with a selection)
//! Any  -> Idle        (release, or cancel on focus loss)
//! ```
//!
//! Positions arrive in screen space and are mapped to model space here.
//! A drag previews on every move and lands in history once, on release.

use crate::command::Drag;
use crate::editor::{Change, Editor};
use crate::error::EditorResult;
use crate::geometry::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Clone, Debug, Default)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    BoxSelect {
        start: Point,
        current: Point,
    },
    Panning {
        last_screen: Point,
    },
    Dragging {
        drag: Drag,
    },
}

impl Editor {
    /// Model-space cursor for a screen position, snapped when asked.
    pub fn cursor_at(&self, screen: Point, snap: bool) -> EditorResult<Point> {
        Ok(self.snap(self.screen_to_model(screen)?, snap))
    }

    /// Box being rubber-banded by the primary button, in model space.
    pub fn selection_box(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::BoxSelect { start, current } => Some(Rect::from_min_max(*start, *current)),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Panning { .. })
    }

    pub fn pointer_pressed(
        &mut self,
        button: PointerButton,
        screen: Point,
        snap: bool,
    ) -> EditorResult<Change> {
        let cursor = self.cursor_at(screen, snap)?;
        let mut change = self.cancel_gesture();
        match button {
            PointerButton::Primary => {
                change = change.merge(self.clear_selection());
                self.gesture = Gesture::BoxSelect {
                    start: cursor,
                    current: cursor,
                };
            }
            PointerButton::Middle => {
                self.gesture = Gesture::Panning {
                    last_screen: screen,
                };
            }
            PointerButton::Secondary => {
                let selected = self.selection.len();
                let on_vertex = self.hit_test(cursor).is_some();
                if !(selected > 1 || (selected == 1 && !on_vertex)) {
                    change = change.merge(self.clear_selection());
                    for id in self.hits_at(cursor) {
                        change = change.merge(self.select(id));
                    }
                }
                if !self.selection.is_empty() {
                    tracing::debug!(count = self.selection.len(), "drag started");
                    self.gesture = Gesture::Dragging {
                        drag: Drag::new(self.selected_vertices(), cursor),
                    };
                }
            }
        }
        Ok(change)
    }

    pub fn pointer_moved(&mut self, screen: Point, snap: bool) -> EditorResult<Change> {
        if let Gesture::Panning { last_screen } = &mut self.gesture {
            let delta = screen - *last_screen;
            self.space.pan(delta.dx, delta.dy)?;
            *last_screen = screen;
            return Ok(Change::View);
        }
        if matches!(self.gesture, Gesture::Idle) {
            return Ok(Change::None);
        }
        let cursor = self.cursor_at(screen, snap)?;
        match &mut self.gesture {
            Gesture::BoxSelect { current, .. } => {
                *current = cursor;
                Ok(Change::Selection)
            }
            Gesture::Dragging { drag } => {
                drag.preview(cursor, &mut self.model);
                Ok(Change::Model)
            }
            _ => Ok(Change::None),
        }
    }

    pub fn pointer_released(
        &mut self,
        button: PointerButton,
        screen: Point,
        snap: bool,
    ) -> EditorResult<Change> {
        let ends_gesture = matches!(
            (button, &self.gesture),
            (PointerButton::Primary, Gesture::BoxSelect { .. })
                | (PointerButton::Middle, Gesture::Panning { .. })
                | (PointerButton::Secondary, Gesture::Dragging { .. })
        );
        if !ends_gesture {
            return Ok(Change::None);
        }
        let change = self.pointer_moved(screen, snap)?;
        Ok(change.merge(self.finish_gesture()))
    }

    /// A click that never became a drag. Only the secondary button acts:
    /// on empty canvas it places a vertex, on a vertex it selects it.
    pub fn pointer_clicked(
        &mut self,
        button: PointerButton,
        screen: Point,
        snap: bool,
    ) -> EditorResult<Change> {
        if button != PointerButton::Secondary {
            return Ok(Change::None);
        }
        let cursor = self.cursor_at(screen, snap)?;
        match self.hit_test(cursor) {
            Some(id) => Ok(self.select(id)),
            None => {
                let _ = self.clear_selection();
                self.create_vertex_at(cursor);
                Ok(Change::Model)
            }
        }
    }

    /// Ends whatever gesture is in progress. An abandoned drag is committed
    /// as if the pointer had been released where it last was.
    pub fn cancel_gesture(&mut self) -> Change {
        self.finish_gesture()
    }

    fn finish_gesture(&mut self) -> Change {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => Change::None,
            Gesture::Panning { .. } => Change::None,
            Gesture::BoxSelect { start, current } => {
                self.select_within(Rect::from_min_max(start, current))
                    .merge(Change::Selection)
            }
            Gesture::Dragging { drag } => {
                if drag.total().is_zero() {
                    return Change::None;
                }
                tracing::debug!(dx = drag.total().dx, dy = drag.total().dy, "drag committed");
                self.queue.enqueue(drag);
                self.queue.run_next(&mut self.model);
                Change::Model
            }
        }
    }
}
