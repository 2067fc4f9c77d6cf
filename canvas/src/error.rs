//! Error type for the canvas crate.
//!
//! Only stage image loading and export encoding are fallible. Everything the
//! controller does in response to pointer input is total.

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// The background image for a stage could not be decoded. Terminal for that stage.
    #[error("failed to load background image for stage {stage}: {reason}")]
    ImageLoadFailure { stage: usize, reason: String },
    /// Raw image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    /// The flattened raster could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    /// A color string was not a palette name or hex value.
    #[error("invalid color: {0}")]
    InvalidColor(String),
    /// An environment override could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
