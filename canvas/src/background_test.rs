use super::*;
use crate::layers::encode_png;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

#[test]
fn decode_reads_png_bytes() {
    let img = RgbaImage::from_pixel(7, 5, RED);
    let bytes = encode_png(&img).unwrap();
    assert_eq!(decode(&bytes).unwrap(), img);
}

#[test]
fn decode_rejects_garbage() {
    assert!(matches!(decode(b"definitely not an image"), Err(CanvasError::Decode(_))));
}

#[test]
fn letterbox_same_size_is_unchanged() {
    let img = RgbaImage::from_pixel(12, 9, RED);
    assert_eq!(letterbox(&img, 12, 9), img);
}

#[test]
fn letterbox_output_has_target_size() {
    let img = RgbaImage::from_pixel(300, 50, RED);
    assert_eq!(letterbox(&img, 1152, 1080).dimensions(), (1152, 1080));
}

#[test]
fn letterbox_wide_image_pads_top_and_bottom() {
    // 40x10 padded to 40x40 (rows 15..25 red), then halved to 20x20.
    let img = RgbaImage::from_pixel(40, 10, RED);
    let out = letterbox(&img, 20, 20);
    let top = out.get_pixel(10, 1);
    assert!(top[0] >= 250 && top[1] >= 250 && top[2] >= 250, "top should be white, got {top:?}");
    let middle = out.get_pixel(10, 10);
    assert!(middle[0] >= 200 && middle[1] <= 60, "middle should be red, got {middle:?}");
}

#[test]
fn letterbox_tall_image_pads_left_and_right() {
    // 10x40 padded to 40x40 (columns 15..25 red), kept at 40x40.
    let img = RgbaImage::from_pixel(10, 40, RED);
    let out = letterbox(&img, 40, 40);
    assert_eq!(*out.get_pixel(0, 20), PAD);
    assert_eq!(*out.get_pixel(14, 20), PAD);
    assert_eq!(*out.get_pixel(15, 20), RED);
    assert_eq!(*out.get_pixel(24, 20), RED);
    assert_eq!(*out.get_pixel(25, 20), PAD);
}

#[test]
fn letterbox_of_empty_source_is_blank_white() {
    let out = letterbox(&RgbaImage::new(0, 0), 4, 3);
    assert_eq!(out, RgbaImage::from_pixel(4, 3, PAD));
}
