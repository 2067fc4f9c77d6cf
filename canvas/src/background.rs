//! Stage background decoding and chart preparation.

#[cfg(test)]
#[path = "background_test.rs"]
mod background_test;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::CanvasError;

/// Padding color used when letterboxing charts.
const PAD: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Decode encoded image bytes (PNG or JPEG) into an RGBA raster.
///
/// # Errors
///
/// Returns [`CanvasError::Decode`] if the bytes are not a supported image.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, CanvasError> {
    let img = image::load_from_memory(bytes).map_err(CanvasError::Decode)?;
    Ok(img.to_rgba8())
}

/// Pad `source` with white to the aspect ratio of `width`×`height`, keeping it
/// centred, then resample to exactly that size with a Lanczos filter.
#[must_use]
pub fn letterbox(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = source.dimensions();
    if sw == 0 || sh == 0 || width == 0 || height == 0 {
        return RgbaImage::from_pixel(width, height, PAD);
    }

    let target_ratio = f64::from(width) / f64::from(height);
    let source_ratio = f64::from(sw) / f64::from(sh);

    let padded = if source_ratio > target_ratio {
        let padded_h = ((f64::from(sw) / target_ratio) as u32).max(sh);
        let mut canvas = RgbaImage::from_pixel(sw, padded_h, PAD);
        imageops::overlay(&mut canvas, source, 0, i64::from((padded_h - sh) / 2));
        canvas
    } else if source_ratio < target_ratio {
        let padded_w = ((f64::from(sh) * target_ratio) as u32).max(sw);
        let mut canvas = RgbaImage::from_pixel(padded_w, sh, PAD);
        imageops::overlay(&mut canvas, source, i64::from((padded_w - sw) / 2), 0);
        canvas
    } else {
        source.clone()
    };

    if padded.dimensions() == (width, height) {
        return padded;
    }
    imageops::resize(&padded, width, height, FilterType::Lanczos3)
}
