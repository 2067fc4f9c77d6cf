use image::Rgba;

use super::*;
use crate::doc::SelectionEntry;

// =============================================================
// Helpers
// =============================================================

const BG: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn layers_with_background(w: u32, h: u32) -> (Layers, RgbaImage) {
    let bg = RgbaImage::from_pixel(w, h, BG);
    let mut layers = Layers::new();
    layers.reset(&bg);
    (layers, bg)
}

fn selection(area: Rect, color: Color) -> HistoryEntry {
    HistoryEntry::Selection(SelectionEntry { area, color, snapshot: RgbaImage::new(0, 0) })
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn new_layers_are_empty() {
    let layers = Layers::new();
    assert!(layers.is_empty());
    assert_eq!(layers.dimensions(), (0, 0));
}

#[test]
fn reset_sizes_both_surfaces_to_background() {
    let (layers, bg) = layers_with_background(64, 48);
    assert_eq!(layers.dimensions(), (64, 48));
    assert_eq!(layers.overlay().dimensions(), (64, 48));
    assert_eq!(layers.base(), &bg);
    assert!(raster::is_blank(layers.overlay()));
}

#[test]
fn reset_to_new_background_resizes() {
    let (mut layers, _) = layers_with_background(10, 10);
    layers.redraw_overlay(&[], Some((Rect::new(1.0, 1.0, 5.0, 5.0), Color::RED)), 2.0);
    let bigger = RgbaImage::from_pixel(30, 20, BG);
    layers.reset(&bigger);
    assert_eq!(layers.dimensions(), (30, 20));
    assert_eq!(layers.overlay().dimensions(), (30, 20));
    assert!(raster::is_blank(layers.overlay()));
}

#[test]
fn release_returns_to_empty() {
    let (mut layers, _) = layers_with_background(10, 10);
    layers.release();
    assert!(layers.is_empty());
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn paint_segment_only_touches_base() {
    let (mut layers, _) = layers_with_background(20, 20);
    layers.paint_segment(Point::new(2.0, 10.0), Point::new(18.0, 10.0), 2.0, Color::BLUE);
    assert_eq!(*layers.base().get_pixel(10, 10), Color::BLUE.pixel());
    assert!(raster::is_blank(layers.overlay()));
}

#[test]
fn snapshot_reads_current_base_pixels() {
    let (mut layers, _) = layers_with_background(20, 20);
    layers.paint_segment(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 2.0, Color::RED);
    let snap = layers.snapshot(&Rect::new(4.0, 4.0, 4.0, 4.0));
    assert_eq!(snap.dimensions(), (4, 4));
    assert_eq!(*snap.get_pixel(0, 0), Color::RED.pixel());
    assert_eq!(*snap.get_pixel(3, 3), BG);
}

// =============================================================
// Flatten / export
// =============================================================

#[test]
fn flatten_composites_overlay_over_base() {
    let (mut layers, _) = layers_with_background(60, 60);
    layers.paint_segment(Point::new(30.0, 0.0), Point::new(30.0, 60.0), 2.0, Color::BLUE);
    layers.redraw_overlay(&[selection(Rect::new(10.0, 10.0, 40.0, 40.0), Color::RED)], None, 2.0);

    let flat = layers.flatten();
    assert_eq!(flat.dimensions(), (60, 60));
    for (x, y, pixel) in flat.enumerate_pixels() {
        let over = layers.overlay().get_pixel(x, y);
        let expected = if over[3] == 0 { *layers.base().get_pixel(x, y) } else { *over };
        assert_eq!(*pixel, expected, "pixel ({x}, {y})");
    }
    // Where the stroke crosses the outline, the outline wins.
    assert_eq!(*flat.get_pixel(30, 10), Color::RED.pixel());
    assert_eq!(*flat.get_pixel(30, 30), Color::BLUE.pixel());
}

#[test]
fn flatten_does_not_mutate_layers() {
    let (mut layers, _) = layers_with_background(20, 20);
    layers.redraw_overlay(&[], Some((Rect::new(2.0, 2.0, 10.0, 10.0), Color::GREEN)), 2.0);
    let base_before = layers.base().clone();
    let overlay_before = layers.overlay().clone();
    let _flat = layers.flatten();
    assert_eq!(layers.base(), &base_before);
    assert_eq!(layers.overlay(), &overlay_before);
}

#[test]
fn encode_png_round_trips_pixels() {
    let (mut layers, _) = layers_with_background(16, 12);
    layers.paint_segment(Point::new(1.0, 1.0), Point::new(14.0, 10.0), 2.0, Color::GREEN);
    let flat = layers.flatten();
    let png = encode_png(&flat).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded, flat);
}

#[test]
fn data_uri_has_png_prefix_and_decodes() {
    let img = RgbaImage::from_pixel(3, 2, Color::YELLOW.pixel());
    let uri = png_data_uri(&img).unwrap();
    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    let bytes = general_purpose::STANDARD.decode(payload).unwrap();
    assert_eq!(image::load_from_memory(&bytes).unwrap().to_rgba8(), img);
}
