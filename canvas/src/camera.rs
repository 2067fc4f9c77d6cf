//! Pointer-to-pixel coordinate mapping.
//!
//! The canvas element is displayed at whatever size its container gives it,
//! while its surfaces keep the intrinsic pixel dimensions of the stage image.
//! Every pointer event is mapped through the bounds reported *for that event*;
//! nothing here is cached between events.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either client space or canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The canvas element's displayed bounding box in client (CSS pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayBounds {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Bounds that display the canvas unscaled at the client origin.
    #[must_use]
    pub fn identity(intrinsic_width: u32, intrinsic_height: u32) -> Self {
        Self::new(0.0, 0.0, f64::from(intrinsic_width), f64::from(intrinsic_height))
    }

    /// Map a client-space point into intrinsic pixel space.
    ///
    /// `x = (client.x - left) * (intrinsic_width / width)`, likewise for y.
    /// A collapsed axis (zero or negative displayed size) maps with scale 1.
    #[must_use]
    pub fn to_canvas(&self, client: Point, intrinsic_width: u32, intrinsic_height: u32) -> Point {
        Point {
            x: (client.x - self.left) * axis_scale(intrinsic_width, self.width),
            y: (client.y - self.top) * axis_scale(intrinsic_height, self.height),
        }
    }
}

fn axis_scale(intrinsic: u32, displayed: f64) -> f64 {
    if displayed > 0.0 && intrinsic > 0 { f64::from(intrinsic) / displayed } else { 1.0 }
}
