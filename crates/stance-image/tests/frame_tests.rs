use crates_image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use stance_base::Tensor;
use stance_image::{
    decode_image, flip_horizontal, frame_size, load_rgba, resize, Filter, Frame, ImageError,
};
use std::io::Cursor;

fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode test image");
    bytes
}

fn gradient_frame(width: usize, height: usize) -> Frame {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 42]);
        }
    }
    Tensor::new(vec![height, width, 3], data).unwrap()
}

#[test]
fn test_decode_png_to_rgb_frame() {
    let image = RgbImage::from_pixel(4, 2, Rgb([10, 20, 30]));
    let frame = decode_image(&encode(&image, ImageFormat::Png)).unwrap();

    assert_eq!(frame.shape, vec![2, 4, 3]);
    assert_eq!(&frame.data[0..3], &[10, 20, 30]);
}

#[test]
fn test_decode_jpeg_to_rgb_frame() {
    let image = RgbImage::from_pixel(16, 8, Rgb([200, 200, 200]));
    let frame = decode_image(&encode(&image, ImageFormat::Jpeg)).unwrap();

    assert_eq!(frame.shape, vec![8, 16, 3]);
    // lossy, but a flat gray block survives closely
    assert!(frame.data.iter().all(|&v| (195..=205).contains(&v)));
}

#[test]
fn test_decode_garbage_fails() {
    let result = decode_image(&[0xde, 0xad, 0xbe, 0xef]);
    assert!(matches!(result, Err(ImageError::Decode(_))));
}

#[test]
fn test_frame_size_rejects_wrong_channels() {
    let gray = Tensor::new(vec![2, 2, 1], vec![0u8; 4]).unwrap();
    assert!(matches!(frame_size(&gray), Err(ImageError::Shape(_))));

    let empty = Tensor::new(vec![0, 2, 3], vec![]).unwrap();
    assert!(matches!(frame_size(&empty), Err(ImageError::Shape(_))));
}

#[test]
fn test_resize_changes_shape() {
    let frame = gradient_frame(64, 48);
    let resized = resize(&frame, 224, 224, Filter::Bilinear).unwrap();
    assert_eq!(resized.shape, vec![224, 224, 3]);

    let shrunk = resize(&frame, 8, 6, Filter::Nearest).unwrap();
    assert_eq!(shrunk.shape, vec![6, 8, 3]);
}

#[test]
fn test_resize_uniform_frame_stays_uniform() {
    let frame = Tensor::filled(vec![30, 40, 3], 255u8).unwrap();
    let resized = resize(&frame, 224, 224, Filter::Bilinear).unwrap();
    assert!(resized.data.iter().all(|&v| v == 255));
}

#[test]
fn test_resize_is_deterministic() {
    let frame = gradient_frame(25, 19);
    let a = resize(&frame, 224, 224, Filter::Bilinear).unwrap();
    let b = resize(&frame, 224, 224, Filter::Bilinear).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_resize_to_zero_fails() {
    let frame = gradient_frame(4, 4);
    assert!(matches!(
        resize(&frame, 0, 4, Filter::Nearest),
        Err(ImageError::Shape(_))
    ));
}

#[test]
fn test_flip_horizontal_mirrors_rows() {
    // 3x1 frame: red, green, blue
    let mut frame = Tensor::new(vec![1, 3, 3], vec![255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
    flip_horizontal(&mut frame).unwrap();
    assert_eq!(frame.data, vec![0, 0, 255, 0, 255, 0, 255, 0, 0]);
}

#[test]
fn test_flip_horizontal_twice_is_identity() {
    let original = gradient_frame(7, 5);
    let mut frame = original.clone();
    flip_horizontal(&mut frame).unwrap();
    assert_ne!(frame, original);
    flip_horizontal(&mut frame).unwrap();
    assert_eq!(frame, original);
}

#[test]
fn test_flip_horizontal_keeps_rows_apart() {
    let mut frame = gradient_frame(4, 3);
    flip_horizontal(&mut frame).unwrap();
    for y in 0..3 {
        for x in 0..4 {
            let i = (y * 4 + x) * 3;
            assert_eq!(frame.data[i..i + 3], [((3 - x) * 10) as u8, (y * 10) as u8, 42]);
        }
    }
}

#[test]
fn test_flip_horizontal_rejects_short_buffer() {
    let mut frame = Tensor {
        shape: vec![2, 2, 3],
        data: vec![0u8; 9],
    };
    assert!(matches!(flip_horizontal(&mut frame), Err(ImageError::Shape(_))));
    assert_eq!(frame.data.len(), 9);
}

#[test]
fn test_load_rgba_from_png_file() {
    let path = std::env::temp_dir().join(format!("stance-icon-test-{}.png", std::process::id()));
    RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]))
        .save(&path)
        .expect("write test icon");

    let icon = load_rgba(&path).unwrap();
    assert_eq!(icon.shape, vec![2, 3, 4]);
    assert_eq!(&icon.data[0..4], &[1, 2, 3, 4]);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_load_rgba_missing_file() {
    let result = load_rgba("/nonexistent/stance/icon.png");
    assert!(matches!(result, Err(ImageError::Io(_))));
}
