//! Canvas configuration parsed from environment variables.

use crate::consts::{FALLBACK_HEIGHT, FALLBACK_WIDTH, IMAGE_ROOT, OUTLINE_WIDTH_PX, STAGE_COUNT, STROKE_WIDTH_PX};
use crate::error::CanvasError;

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Pen line width in canvas pixels.
    pub stroke_width: f64,
    /// Selection outline width in canvas pixels.
    pub outline_width: f64,
    /// Size of the blank raster exported before any stage image is ready.
    pub fallback_width: u32,
    pub fallback_height: u32,
    /// Number of stages before the session is complete.
    pub stage_count: usize,
    /// Directory stage images are addressed under.
    pub image_root: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            stroke_width: STROKE_WIDTH_PX,
            outline_width: OUTLINE_WIDTH_PX,
            fallback_width: FALLBACK_WIDTH,
            fallback_height: FALLBACK_HEIGHT,
            stage_count: STAGE_COUNT,
            image_root: IMAGE_ROOT.to_owned(),
        }
    }
}

impl CanvasConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `CANVAS_STROKE_WIDTH`: pen width in pixels (default 2)
    /// - `CANVAS_OUTLINE_WIDTH`: selection outline width in pixels (default 2)
    /// - `CANVAS_FALLBACK_SIZE`: `WIDTHxHEIGHT` of the empty export (default `1152x1080`)
    /// - `CANVAS_STAGE_COUNT`: number of stages (default 29)
    /// - `CANVAS_IMAGE_ROOT`: stage image directory (default `/images`)
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Config`] if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, CanvasError> {
        let defaults = Self::default();

        let stroke_width = env_parse_width("CANVAS_STROKE_WIDTH", defaults.stroke_width)?;
        let outline_width = env_parse_width("CANVAS_OUTLINE_WIDTH", defaults.outline_width)?;
        let (fallback_width, fallback_height) = match env_var("CANVAS_FALLBACK_SIZE") {
            Some(raw) => parse_size(&raw)?,
            None => (defaults.fallback_width, defaults.fallback_height),
        };
        let stage_count = match env_var("CANVAS_STAGE_COUNT") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| CanvasError::Config(format!("CANVAS_STAGE_COUNT '{raw}': {e}")))?,
            None => defaults.stage_count,
        };
        let image_root = env_var("CANVAS_IMAGE_ROOT")
            .map_or(defaults.image_root, |root| root.trim_end_matches('/').to_owned());

        Ok(Self { stroke_width, outline_width, fallback_width, fallback_height, stage_count, image_root })
    }
}

/// Parse a `WIDTHxHEIGHT` size such as `1152x1080`.
///
/// # Errors
///
/// Returns [`CanvasError::Config`] if either side is missing, non-numeric, or zero.
pub fn parse_size(raw: &str) -> Result<(u32, u32), CanvasError> {
    let invalid = || CanvasError::Config(format!("size '{raw}' (expected WIDTHxHEIGHT)"));
    let (w, h) = raw.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let w = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let h = h.trim().parse::<u32>().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

fn env_parse_width(key: &str, default: f64) -> Result<f64, CanvasError> {
    let Some(raw) = env_var(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(CanvasError::Config(format!("{key} '{raw}' (expected a positive number)"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
