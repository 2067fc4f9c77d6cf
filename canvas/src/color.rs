//! Stroke and outline colors.
//!
//! Colors travel as strings (palette names or `#rrggbb[aa]`) and are stored as
//! straight-alpha RGBA bytes, the same layout the raster surfaces use.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::CanvasError;

/// An RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const RED: Self = Self([0xFF, 0x00, 0x00, 0xFF]);
    pub const BLUE: Self = Self([0x00, 0x00, 0xFF, 0xFF]);
    pub const GREEN: Self = Self([0x00, 0x80, 0x00, 0xFF]);
    pub const YELLOW: Self = Self([0xFF, 0xFF, 0x00, 0xFF]);
    pub const BLACK: Self = Self([0x00, 0x00, 0x00, 0xFF]);
    pub const WHITE: Self = Self([0xFF, 0xFF, 0xFF, 0xFF]);
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    #[must_use]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// The pixel value this color paints.
    #[must_use]
    pub fn pixel(self) -> Rgba<u8> {
        Rgba(self.0)
    }

    /// Palette name for this color, if it is one of the toolbar swatches.
    #[must_use]
    pub fn palette_name(self) -> Option<&'static str> {
        PALETTE.iter().find(|(_, c)| *c == self).map(|(name, _)| *name)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Toolbar swatches, in display order.
pub const PALETTE: [(&str, Color); 5] = [
    ("red", Color::RED),
    ("blue", Color::BLUE),
    ("green", Color::GREEN),
    ("yellow", Color::YELLOW),
    ("black", Color::BLACK),
];

impl FromStr for Color {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if let Some((_, color)) = PALETTE.iter().find(|(name, _)| *name == lower) {
            return Ok(*color);
        }
        match lower.as_str() {
            "white" => return Ok(Self::WHITE),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }

        let invalid = || CanvasError::InvalidColor(trimmed.to_owned());
        let hex = lower.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| -> Result<u8, CanvasError> {
            let pair = hex.get(i..i + 2).ok_or_else(invalid)?;
            u8::from_str_radix(pair, 16).map_err(|_| invalid())
        };
        match hex.len() {
            6 => Ok(Self([channel(0)?, channel(2)?, channel(4)?, 0xFF])),
            8 => Ok(Self([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.palette_name() {
            return f.write_str(name);
        }
        let [r, g, b, a] = self.0;
        if a == 0xFF {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl TryFrom<String> for Color {
    type Error = CanvasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
