//! Error types for editor operations.
//!
//! Every failure here is recoverable: the operation that produced it leaves
//! the model, history, selection and view exactly as they were.

use thiserror::Error;

pub use crate::persist::{ParseError, ParseErrorKind};

#[derive(Error, Debug)]
pub enum EditorError {
    /// Pan/zoom/world change would make screen -> model mapping singular
    #[error("transform is not invertible (determinant {determinant})")]
    NonInvertibleTransform { determinant: f64 },

    /// Zoom factor was zero, negative or not finite
    #[error("zoom factor must be finite and positive, got {0}")]
    InvalidZoom(f64),

    /// Malformed line in a vertex file
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Scaling against a zero-width or zero-height bounding box
    #[error("cannot scale a {width}x{height} bounding box")]
    DegenerateScale { width: f64, height: f64 },

    /// Scale factors that would produce NaN, infinite or collapsed coordinates
    #[error("invalid scale factors ({sx}, {sy})")]
    InvalidScale { sx: f64, sy: f64 },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be serialized
    #[error("settings error: {0}")]
    Settings(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
