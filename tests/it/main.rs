//! Single test binary entry point.
//!
//! - unit: one component at a time (coordinate space, model, queue)
//! - integration: editor workflows across gestures, history and files

mod helpers;
mod unit;
