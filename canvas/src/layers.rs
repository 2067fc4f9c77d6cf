//! The two stacked raster surfaces and the flattened export.
//!
//! `Layers` owns a base surface (background plus strokes) and an overlay
//! surface (selection outlines only). Both always share the intrinsic size of
//! the current stage image. Nothing outside the crate gets a mutable handle to
//! either surface; the engine drives them through the methods here.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use base64::{Engine as _, engine::general_purpose};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};

use crate::camera::Point;
use crate::color::Color;
use crate::consts::PNG_DATA_URI_PREFIX;
use crate::doc::{HistoryEntry, Rect};
use crate::error::CanvasError;
use crate::{raster, replay};

#[derive(Debug, Clone)]
pub struct Layers {
    base: RgbaImage,
    overlay: RgbaImage,
}

impl Default for Layers {
    fn default() -> Self {
        Self { base: raster::blank(0, 0), overlay: raster::blank(0, 0) }
    }
}

impl Layers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intrinsic pixel size shared by both surfaces.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.base.dimensions()
    }

    /// True until a background has been installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.width() == 0 || self.base.height() == 0
    }

    /// Resize both surfaces to `background`, draw it on the base, blank the overlay.
    pub fn reset(&mut self, background: &RgbaImage) {
        self.base = background.clone();
        if self.overlay.dimensions() == background.dimensions() {
            raster::clear(&mut self.overlay);
        } else {
            self.overlay = raster::blank(background.width(), background.height());
        }
    }

    /// Drop both surfaces back to zero size.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    /// Draw one live pen segment straight onto the base surface.
    pub fn paint_segment(&mut self, from: Point, to: Point, width: f64, color: Color) {
        raster::stroke_segment(&mut self.base, from, to, width, color);
    }

    /// Copy of the base pixels under `area`.
    #[must_use]
    pub fn snapshot(&self, area: &Rect) -> RgbaImage {
        raster::snapshot(&self.base, area)
    }

    /// Rebuild the base surface from the background and every stroke in `entries`.
    pub fn rebuild_base(&mut self, background: &RgbaImage, entries: &[HistoryEntry], stroke_width: f64) {
        replay::replay_into(&mut self.base, background, entries, stroke_width);
    }

    /// Clear and fully redraw the overlay.
    pub fn redraw_overlay(&mut self, entries: &[HistoryEntry], pending: Option<(Rect, Color)>, outline_width: f64) {
        replay::render_overlay_into(&mut self.overlay, entries, pending, outline_width);
    }

    /// Base with the overlay composited on top, in a fresh raster.
    #[must_use]
    pub fn flatten(&self) -> RgbaImage {
        let mut scratch = self.base.clone();
        raster::composite_over(&mut scratch, &self.overlay);
        scratch
    }

    pub(crate) fn base(&self) -> &RgbaImage {
        &self.base
    }

    pub(crate) fn overlay(&self) -> &RgbaImage {
        &self.overlay
    }
}

/// Encode a raster as PNG bytes.
///
/// # Errors
///
/// Returns [`CanvasError::Encode`] if the encoder rejects the image (e.g. zero size).
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CanvasError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(CanvasError::Encode)?;
    Ok(buf)
}

/// Encode a raster as a `data:image/png;base64,...` URI.
///
/// # Errors
///
/// Returns [`CanvasError::Encode`] if PNG encoding fails.
pub fn png_data_uri(image: &RgbaImage) -> Result<String, CanvasError> {
    let png = encode_png(image)?;
    Ok(format!("{PNG_DATA_URI_PREFIX}{}", general_purpose::STANDARD.encode(png)))
}
