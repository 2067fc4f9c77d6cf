//! Shared numeric constants for the canvas crate.

// ── Strokes ─────────────────────────────────────────────────────

/// Pen line width in canvas pixels.
pub const STROKE_WIDTH_PX: f64 = 2.0;

/// Selection outline width in canvas pixels.
pub const OUTLINE_WIDTH_PX: f64 = 2.0;

// ── Export ──────────────────────────────────────────────────────

/// Width of the blank raster exported before any stage image is ready.
pub const FALLBACK_WIDTH: u32 = 1152;

/// Height of the blank raster exported before any stage image is ready.
pub const FALLBACK_HEIGHT: u32 = 1080;

/// MIME prefix for exported data URIs.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

// ── Stages ──────────────────────────────────────────────────────

/// Number of chart stages in a session.
pub const STAGE_COUNT: usize = 29;

/// Resource directory stage images are served from.
pub const IMAGE_ROOT: &str = "/images";
