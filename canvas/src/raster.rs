//! Pixel primitives shared by the base and overlay layers.
//!
//! Everything here is integer-exact and free of anti-aliasing so the same
//! sequence of calls always produces the same pixels. A pixel is covered by a
//! shape when its centre `(px + 0.5, py + 0.5)` lies inside the shape.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use image::{Rgba, RgbaImage, imageops};

use crate::camera::Point;
use crate::color::Color;
use crate::doc::{PixelBounds, Rect};

/// Composite `src` over `dst` with straight alpha.
#[must_use]
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 || dst[3] == 0 {
        return src;
    }
    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }
    let inv = 1.0 / out_a;
    let channel = |i: usize| {
        ((f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) * inv)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba([channel(0), channel(1), channel(2), (out_a * 255.0).round().clamp(0.0, 255.0) as u8])
}

/// Paint the capsule around segment `a`–`b` with diameter `width`.
///
/// Round caps and joins fall out of the capsule shape; a zero-length segment
/// paints a dot. Each covered pixel is blended exactly once per call.
pub fn stroke_segment(surface: &mut RgbaImage, a: Point, b: Point, width: f64, color: Color) {
    if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) || width <= 0.0 {
        return;
    }
    let radius = width / 2.0;
    let (w, h) = (i64::from(surface.width()), i64::from(surface.height()));

    let min_x = ((a.x.min(b.x) - radius).floor() as i64).max(0);
    let min_y = ((a.y.min(b.y) - radius).floor() as i64).max(0);
    let max_x = ((a.x.max(b.x) + radius).ceil() as i64).min(w - 1);
    let max_y = ((a.y.max(b.y) + radius).ceil() as i64).min(h - 1);

    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let r_sq = radius * radius;
    let src = color.pixel();

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let cx = px as f64 + 0.5;
            let cy = py as f64 + 0.5;
            let t = if len_sq > 0.0 { (((cx - a.x) * dx + (cy - a.y) * dy) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
            let ex = cx - (a.x + t * dx);
            let ey = cy - (a.y + t * dy);
            if ex * ex + ey * ey <= r_sq {
                let pixel = surface.get_pixel_mut(px as u32, py as u32);
                *pixel = blend_over(*pixel, src);
            }
        }
    }
}

/// Paint an outline `width` pixels thick just inside the inclusive `bounds`.
pub fn stroke_outline(surface: &mut RgbaImage, bounds: PixelBounds, width: f64, color: Color) {
    let thickness = width.round().max(1.0) as i64;
    let (w, h) = (i64::from(surface.width()), i64::from(surface.height()));
    let src = color.pixel();

    for py in bounds.y0.max(0)..=bounds.y1.min(h - 1) {
        let on_row_edge = py < bounds.y0 + thickness || py > bounds.y1 - thickness;
        for px in bounds.x0.max(0)..=bounds.x1.min(w - 1) {
            if on_row_edge || px < bounds.x0 + thickness || px > bounds.x1 - thickness {
                let pixel = surface.get_pixel_mut(px as u32, py as u32);
                *pixel = blend_over(*pixel, src);
            }
        }
    }
}

/// Copy the pixels under the normalized `area`, clipped to the surface.
#[must_use]
pub fn snapshot(surface: &RgbaImage, area: &Rect) -> RgbaImage {
    let b = area.pixel_bounds();
    let (w, h) = (i64::from(surface.width()), i64::from(surface.height()));
    let x0 = b.x0.clamp(0, w);
    let y0 = b.y0.clamp(0, h);
    let x1 = b.x1.clamp(0, w);
    let y1 = b.y1.clamp(0, h);
    imageops::crop_imm(surface, x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32).to_image()
}

/// Composite `top` over `bottom` in place, aligned at the origin.
///
/// Only the overlapping region is touched when the sizes differ.
pub fn composite_over(bottom: &mut RgbaImage, top: &RgbaImage) {
    let w = bottom.width().min(top.width());
    let h = bottom.height().min(top.height());
    for y in 0..h {
        for x in 0..w {
            let src = *top.get_pixel(x, y);
            if src[3] == 0 {
                continue;
            }
            let dst = bottom.get_pixel_mut(x, y);
            *dst = blend_over(*dst, src);
        }
    }
}

/// A fully transparent surface.
#[must_use]
pub fn blank(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width, height)
}

/// Reset every pixel to transparent without reallocating.
pub fn clear(surface: &mut RgbaImage) {
    for pixel in surface.pixels_mut() {
        *pixel = Rgba([0, 0, 0, 0]);
    }
}

/// Whether every pixel is fully transparent.
#[must_use]
pub fn is_blank(surface: &RgbaImage) -> bool {
    surface.pixels().all(|p| p[3] == 0)
}
