//! History replay: rebuild both layers from the background and the history.
//!
//! The base layer is the background with every stroke re-drawn in commit
//! order. The overlay layer is the outline of every committed selection plus
//! the one being dragged, if any. Both are pure functions of their inputs, so
//! replaying the same history twice yields identical pixels.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use image::RgbaImage;

use crate::color::Color;
use crate::doc::{HistoryEntry, Rect, StrokeEntry};
use crate::raster;

/// Re-draw `stroke` onto `surface`.
///
/// Runs the same segment sequence the live pen produces: a dot at the first
/// point, then one segment per consecutive pair.
pub fn paint_stroke(surface: &mut RgbaImage, stroke: &StrokeEntry, width: f64) {
    let mut prev = None;
    for &point in &stroke.points {
        raster::stroke_segment(surface, prev.unwrap_or(point), point, width, stroke.color);
        prev = Some(point);
    }
}

/// Replay `entries` over `background` into a new raster the size of the background.
#[must_use]
pub fn replay(background: &RgbaImage, entries: &[HistoryEntry], stroke_width: f64) -> RgbaImage {
    let mut target = background.clone();
    for stroke in entries.iter().filter_map(HistoryEntry::as_stroke) {
        paint_stroke(&mut target, stroke, stroke_width);
    }
    target
}

/// Replay into an existing surface, reusing its allocation when the size matches.
pub fn replay_into(target: &mut RgbaImage, background: &RgbaImage, entries: &[HistoryEntry], stroke_width: f64) {
    if target.dimensions() == background.dimensions() {
        target.copy_from_slice(background.as_raw());
    } else {
        *target = background.clone();
    }
    for stroke in entries.iter().filter_map(HistoryEntry::as_stroke) {
        paint_stroke(target, stroke, stroke_width);
    }
}

/// Clear `target` and outline every committed selection, then the pending one.
pub fn render_overlay_into(
    target: &mut RgbaImage,
    entries: &[HistoryEntry],
    pending: Option<(Rect, Color)>,
    outline_width: f64,
) {
    raster::clear(target);
    for selection in entries.iter().filter_map(HistoryEntry::as_selection) {
        raster::stroke_outline(target, selection.area.pixel_bounds(), outline_width, selection.color);
    }
    if let Some((rect, color)) = pending {
        raster::stroke_outline(target, rect.pixel_bounds(), outline_width, color);
    }
}

/// Overlay raster of the given size for `entries` and the pending selection.
#[must_use]
pub fn render_overlay(
    width: u32,
    height: u32,
    entries: &[HistoryEntry],
    pending: Option<(Rect, Color)>,
    outline_width: f64,
) -> RgbaImage {
    let mut target = raster::blank(width, height);
    render_overlay_into(&mut target, entries, pending, outline_width);
    target
}
