//! Editing core for ShapeScape, a 2D vertex/polyline editor.
//!
//! The crate is split the way data flows through it: pointer input arrives
//! in screen space, [`space::CoordinateSpace`] maps it into model space,
//! [`editor::Editor`] turns it into [`command`]s, and the
//! [`queue::CommandQueue`] runs them against the [`model::Model`] and keeps
//! them for undo. Nothing here draws; callers repaint when a call reports a
//! [`Change`].

pub mod command;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod model;
pub mod persist;
pub mod queue;
pub mod settings;
pub mod space;

pub use editor::{Change, Editor};
pub use error::{EditorError, EditorResult};
pub use gesture::PointerButton;
pub use settings::Settings;
