//! Drawing model: committed gestures and the history that orders them.
//!
//! A [`HistoryEntry`] is one completed gesture: a freehand pen stroke or a
//! marked rectangular region. [`DrawingHistory`] keeps them in the order they
//! were committed, which is also the order undo removes them in. The raster
//! layers are derived from this history and the stage background; the history
//! is the only state that is not recomputable.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::color::Color;

/// A rectangle anchored at `(x, y)`. Width and height may be negative when
/// the drag went left or up; use [`Rect::normalized`] before pixel work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The rectangle spanned by an anchor and the current pointer position.
    #[must_use]
    pub fn from_corners(anchor: Point, current: Point) -> Self {
        Self { x: anchor.x, y: anchor.y, width: current.x - anchor.x, height: current.y - anchor.y }
    }

    /// Same area with the origin at the top-left and non-negative extent.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            x: self.x.min(self.x + self.width),
            y: self.y.min(self.y + self.height),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// Inclusive pixel bounds covered by the normalized rectangle.
    #[must_use]
    pub fn pixel_bounds(&self) -> PixelBounds {
        let n = self.normalized();
        PixelBounds {
            x0: n.x.round() as i64,
            y0: n.y.round() as i64,
            x1: (n.x + n.width).round() as i64,
            y1: (n.y + n.height).round() as i64,
        }
    }
}

/// Inclusive integer pixel bounds. `x0 <= x1` and `y0 <= y1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

/// A freehand pen gesture. Points are in drawing order and never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeEntry {
    pub points: Vec<Point>,
    pub color: Color,
}

/// A marked region, with the base-layer pixels it covered when it was marked.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEntry {
    pub area: Rect,
    pub color: Color,
    pub snapshot: RgbaImage,
}

/// One committed, immutable gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    Stroke(StrokeEntry),
    Selection(SelectionEntry),
}

impl HistoryEntry {
    #[must_use]
    pub fn as_stroke(&self) -> Option<&StrokeEntry> {
        match self {
            Self::Stroke(stroke) => Some(stroke),
            Self::Selection(_) => None,
        }
    }

    #[must_use]
    pub fn as_selection(&self) -> Option<&SelectionEntry> {
        match self {
            Self::Selection(selection) => Some(selection),
            Self::Stroke(_) => None,
        }
    }
}

/// Append-only gesture log. Undo pops the newest entry; clear empties it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingHistory {
    entries: Vec<HistoryEntry>,
}

impl DrawingHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed gesture and return its index.
    pub fn commit(&mut self, entry: HistoryEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Remove and return the newest entry, if any.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> impl Iterator<Item = &StrokeEntry> {
        self.entries.iter().filter_map(HistoryEntry::as_stroke)
    }

    /// Committed selections, oldest first.
    pub fn selections(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter().filter_map(HistoryEntry::as_selection)
    }
}
