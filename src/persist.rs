//! Plain-text vertex files (`.cvg`).
//!
//! One vertex per line as `x,y`, relative to the top-left of the bounding
//! box. Loading offsets every vertex by one grid cell.

use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;

use crate::command::CreateVertex;
use crate::editor::{Change, Editor};
use crate::error::EditorResult;
use crate::geometry::Point;
use crate::model::Model;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Line did not split into exactly two comma-separated fields.
    FieldCount(usize),
    InvalidNumber(String),
    NonFinite,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("line {line}: {} in {content:?}", describe(.kind))]
pub struct ParseError {
    /// 1-based.
    pub line: usize,
    pub content: String,
    pub kind: ParseErrorKind,
}

fn describe(kind: &ParseErrorKind) -> String {
    match kind {
        ParseErrorKind::FieldCount(n) => format!("expected 2 fields, found {n}"),
        ParseErrorKind::InvalidNumber(field) => format!("invalid number {field:?}"),
        ParseErrorKind::NonFinite => "coordinate is not finite".to_string(),
    }
}

fn parse_line(line: usize, content: &str) -> Result<Point, ParseError> {
    let fail = |kind| ParseError {
        line,
        content: content.to_string(),
        kind,
    };
    let fields: Vec<&str> = content.split(',').map(str::trim).collect();
    let &[x, y] = fields.as_slice() else {
        return Err(fail(ParseErrorKind::FieldCount(fields.len())));
    };
    let coord = |field: &str| -> Result<f64, ParseError> {
        let value: f64 = field
            .parse()
            .map_err(|_| fail(ParseErrorKind::InvalidNumber(field.to_string())))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(fail(ParseErrorKind::NonFinite))
        }
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

/// Parses every non-blank line. The first malformed line fails the whole
/// input.
pub fn parse_vertices(text: &str) -> Result<Vec<Point>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_line(i + 1, l))
        .collect()
}

/// Vertex positions in model order, shifted so the bounding box starts at
/// the origin.
pub fn to_text(model: &Model) -> String {
    let origin = model.bounds().min;
    let mut out = String::new();
    for id in model.ids() {
        let Some(p) = model.display_position(*id) else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{},{}", p.x - origin.x, p.y - origin.y);
    }
    out
}

impl Editor {
    pub fn save_to_string(&self) -> String {
        to_text(&self.model)
    }

    pub fn save_to_path(&self, path: &Path) -> EditorResult<()> {
        std::fs::write(path, self.save_to_string())?;
        tracing::info!(path = %path.display(), vertices = self.model.len(), "saved");
        Ok(())
    }

    /// Replaces the scene with the vertices in `text`. Nothing changes if
    /// any line fails to parse.
    pub fn load_from_str(&mut self, text: &str) -> EditorResult<usize> {
        let points = parse_vertices(text)?;
        let _ = self.new_scene();
        let offset = self.grid_size();
        for p in &points {
            self.queue
                .enqueue(CreateVertex::new(Point::new(p.x + offset, p.y + offset)));
        }
        self.queue.run_all(&mut self.model);
        Ok(points.len())
    }

    pub fn load_from_path(&mut self, path: &Path) -> EditorResult<Change> {
        let text = std::fs::read_to_string(path)?;
        let count = self.load_from_str(&text).inspect_err(|err| {
            tracing::warn!(path = %path.display(), %err, "load failed");
        })?;
        tracing::info!(path = %path.display(), vertices = count, "loaded");
        Ok(Change::Model)
    }
}
