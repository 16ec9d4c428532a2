use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use pose_classifier::canvas::{pack, unpack};
use pose_classifier::Canvas;
use stance_base::Tensor;

const RED: Rgb888 = Rgb888::new(255, 0, 0);
const TEAL: Rgb888 = Rgb888::new(0, 128, 128);

fn solid(width: usize, height: usize, color: Rgb888) -> Tensor<u8> {
    let data = [color.r(), color.g(), color.b()].repeat(width * height);
    Tensor::new(vec![height, width, 3], data).unwrap()
}

#[test]
fn test_pack_layout() {
    assert_eq!(pack(Rgb888::new(0x12, 0x34, 0x56)), 0x0012_3456);
    assert_eq!(unpack(0xFF12_3456), Rgb888::new(0x12, 0x34, 0x56));
}

#[test]
fn test_new_canvas_is_filled() {
    let canvas = Canvas::new(4, 3, TEAL);
    assert_eq!(canvas.pixels().len(), 12);
    assert!(canvas.pixels().iter().all(|&p| p == pack(TEAL)));
    assert_eq!(canvas.pixel(4, 0), None);
}

#[test]
fn test_fill_rect_clips_to_canvas() {
    let mut canvas = Canvas::new(4, 4, Rgb888::BLACK);
    canvas.fill_rect(&Rectangle::new(Point::new(2, -1), Size::new(10, 2)), RED);

    assert_eq!(canvas.pixel(2, 0), Some(RED));
    assert_eq!(canvas.pixel(3, 0), Some(RED));
    assert_eq!(canvas.pixel(1, 0), Some(Rgb888::BLACK));
    assert_eq!(canvas.pixel(2, 1), Some(Rgb888::BLACK));
}

#[test]
fn test_stroke_rect_stays_inside() {
    let mut canvas = Canvas::new(8, 8, Rgb888::BLACK);
    canvas.stroke_rect(&Rectangle::new(Point::new(1, 1), Size::new(6, 6)), RED, 2);

    assert_eq!(canvas.pixel(0, 0), Some(Rgb888::BLACK));
    assert_eq!(canvas.pixel(1, 1), Some(RED));
    assert_eq!(canvas.pixel(2, 2), Some(RED));
    assert_eq!(canvas.pixel(3, 3), Some(Rgb888::BLACK));
    assert_eq!(canvas.pixel(6, 6), Some(RED));
    assert_eq!(canvas.pixel(7, 7), Some(Rgb888::BLACK));
}

#[test]
fn test_snapshot_skips_offscreen_part() {
    let canvas = Canvas::new(4, 4, TEAL);
    let snapshot = canvas.snapshot(&Rectangle::new(Point::new(2, 2), Size::new(5, 5)));
    assert_eq!(snapshot.len(), 4);
}

#[test]
fn test_blit_wide_frame_is_letterboxed() {
    let mut canvas = Canvas::new(4, 4, TEAL);
    let area = Rectangle::new(Point::zero(), Size::new(4, 4));

    // 2x1 scaled to width 4 becomes 4x2, centred on rows 1 and 2
    canvas.blit_frame(&solid(2, 1, RED), &area).unwrap();

    for x in 0..4 {
        assert_eq!(canvas.pixel(x, 0), Some(Rgb888::BLACK));
        assert_eq!(canvas.pixel(x, 1), Some(RED));
        assert_eq!(canvas.pixel(x, 2), Some(RED));
        assert_eq!(canvas.pixel(x, 3), Some(Rgb888::BLACK));
    }
}

#[test]
fn test_blit_tall_frame_is_cropped() {
    let mut canvas = Canvas::new(6, 6, TEAL);
    let area = Rectangle::new(Point::new(1, 1), Size::new(4, 4));

    canvas.blit_frame(&solid(2, 8, RED), &area).unwrap();

    assert!(canvas.snapshot(&area).iter().all(|&p| p == pack(RED)));
    assert_eq!(canvas.pixel(0, 0), Some(TEAL));
    assert_eq!(canvas.pixel(5, 5), Some(TEAL));
}

#[test]
fn test_blit_rejects_non_rgb_frame() {
    let mut canvas = Canvas::new(4, 4, TEAL);
    let gray = Tensor::new(vec![2, 2, 1], vec![0u8; 4]).unwrap();
    let area = Rectangle::new(Point::zero(), Size::new(4, 4));

    assert!(canvas.blit_frame(&gray, &area).is_err());
    assert!(canvas.pixels().iter().all(|&p| p == pack(TEAL)));
}
