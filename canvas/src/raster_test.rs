use super::*;

// =============================================================
// Helpers
// =============================================================

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn white(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, WHITE)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn painted(img: &RgbaImage, color: Color) -> Vec<(u32, u32)> {
    img.enumerate_pixels()
        .filter(|(_, _, p)| **p == color.pixel())
        .map(|(x, y, _)| (x, y))
        .collect()
}

// =============================================================
// blend_over
// =============================================================

#[test]
fn blend_transparent_source_keeps_destination() {
    assert_eq!(blend_over(WHITE, Rgba([9, 9, 9, 0])), WHITE);
}

#[test]
fn blend_opaque_source_replaces_destination() {
    assert_eq!(blend_over(WHITE, Rgba([255, 0, 0, 255])), Rgba([255, 0, 0, 255]));
}

#[test]
fn blend_onto_transparent_is_source() {
    let src = Rgba([10, 20, 30, 128]);
    assert_eq!(blend_over(Rgba([0, 0, 0, 0]), src), src);
}

#[test]
fn blend_half_alpha_over_opaque_mixes() {
    let out = blend_over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
}

// =============================================================
// stroke_segment
// =============================================================

#[test]
fn zero_length_segment_paints_a_dot() {
    let mut img = white(10, 10);
    stroke_segment(&mut img, pt(5.0, 5.0), pt(5.0, 5.0), 2.0, Color::RED);
    let mut hits = painted(&img, Color::RED);
    hits.sort_unstable();
    assert_eq!(hits, [(4, 4), (4, 5), (5, 4), (5, 5)]);
}

#[test]
fn vertical_segment_is_two_pixels_wide() {
    let mut img = white(20, 20);
    stroke_segment(&mut img, pt(10.0, 2.0), pt(10.0, 15.0), 2.0, Color::BLUE);
    for y in 3..15 {
        assert_eq!(*img.get_pixel(9, y), Color::BLUE.pixel());
        assert_eq!(*img.get_pixel(10, y), Color::BLUE.pixel());
        assert_eq!(*img.get_pixel(8, y), WHITE);
        assert_eq!(*img.get_pixel(11, y), WHITE);
    }
}

#[test]
fn segment_is_clipped_to_surface() {
    let mut img = white(5, 5);
    stroke_segment(&mut img, pt(-20.0, 2.0), pt(40.0, 2.0), 2.0, Color::GREEN);
    assert_eq!(painted(&img, Color::GREEN).len(), 10);
}

#[test]
fn non_finite_points_paint_nothing() {
    let mut img = white(5, 5);
    stroke_segment(&mut img, pt(f64::NAN, 2.0), pt(3.0, 3.0), 2.0, Color::GREEN);
    assert!(painted(&img, Color::GREEN).is_empty());
}

#[test]
fn segment_on_empty_surface_is_noop() {
    let mut img = RgbaImage::new(0, 0);
    stroke_segment(&mut img, pt(0.0, 0.0), pt(3.0, 3.0), 2.0, Color::GREEN);
    assert_eq!(img.dimensions(), (0, 0));
}

// =============================================================
// stroke_outline
// =============================================================

#[test]
fn outline_stays_inside_inclusive_bounds() {
    let mut img = blank(60, 60);
    let bounds = Rect::new(20.0, 20.0, 20.0, 20.0).pixel_bounds();
    stroke_outline(&mut img, bounds, 2.0, Color::RED);

    let hits = painted(&img, Color::RED);
    let min_x = hits.iter().map(|p| p.0).min().unwrap();
    let max_x = hits.iter().map(|p| p.0).max().unwrap();
    let min_y = hits.iter().map(|p| p.1).min().unwrap();
    let max_y = hits.iter().map(|p| p.1).max().unwrap();
    assert_eq!((min_x, max_x, min_y, max_y), (20, 40, 20, 40));

    // Interior stays transparent.
    assert_eq!(img.get_pixel(30, 30)[3], 0);
    assert_eq!(img.get_pixel(22, 22)[3], 0);
    // Edges are two pixels thick.
    assert_eq!(*img.get_pixel(21, 30), Color::RED.pixel());
    assert_eq!(*img.get_pixel(39, 30), Color::RED.pixel());
}

#[test]
fn outline_partially_off_surface_is_clipped() {
    let mut img = blank(10, 10);
    let bounds = PixelBounds { x0: -5, y0: -5, x1: 4, y1: 4 };
    stroke_outline(&mut img, bounds, 2.0, Color::RED);
    assert_eq!(*img.get_pixel(4, 0), Color::RED.pixel());
    assert_eq!(img.get_pixel(0, 0)[3], 0);
    assert_eq!(img.get_pixel(5, 5)[3], 0);
}

// =============================================================
// snapshot
// =============================================================

#[test]
fn snapshot_copies_normalized_region() {
    let mut img = white(50, 50);
    img.put_pixel(20, 25, Color::RED.pixel());
    let snap = snapshot(&img, &Rect::new(30.0, 35.0, -10.0, -10.0));
    assert_eq!(snap.dimensions(), (10, 10));
    assert_eq!(*snap.get_pixel(0, 0), Color::RED.pixel());
    assert_eq!(*snap.get_pixel(1, 1), WHITE);
}

#[test]
fn snapshot_is_clipped_to_surface() {
    let img = white(10, 10);
    let snap = snapshot(&img, &Rect::new(5.0, 5.0, 100.0, 100.0));
    assert_eq!(snap.dimensions(), (5, 5));
    let outside = snapshot(&img, &Rect::new(50.0, 50.0, 10.0, 10.0));
    assert_eq!(outside.dimensions(), (0, 0));
}

// =============================================================
// composite_over / clear
// =============================================================

#[test]
fn composite_paints_only_visible_top_pixels() {
    let mut bottom = white(4, 4);
    let mut top = blank(4, 4);
    top.put_pixel(1, 2, Color::BLUE.pixel());
    composite_over(&mut bottom, &top);
    assert_eq!(*bottom.get_pixel(1, 2), Color::BLUE.pixel());
    assert_eq!(*bottom.get_pixel(0, 0), WHITE);
}

#[test]
fn composite_with_mismatched_sizes_uses_overlap() {
    let mut bottom = white(4, 4);
    let top = RgbaImage::from_pixel(8, 2, Color::GREEN.pixel());
    composite_over(&mut bottom, &top);
    assert_eq!(*bottom.get_pixel(3, 1), Color::GREEN.pixel());
    assert_eq!(*bottom.get_pixel(3, 2), WHITE);
}

#[test]
fn clear_makes_surface_blank() {
    let mut img = white(3, 3);
    assert!(!is_blank(&img));
    clear(&mut img);
    assert!(is_blank(&img));
}
