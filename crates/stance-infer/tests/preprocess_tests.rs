use stance_base::Tensor;
use stance_infer::{prepare, InferError, INPUT_SHAPE};

fn noise_frame(width: usize, height: usize) -> Tensor<u8> {
    // deterministic pseudo-random pixels
    let mut state = 0x2545_f491u32;
    let data = (0..width * height * 3)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    Tensor::new(vec![height, width, 3], data).unwrap()
}

#[test]
fn test_prepare_output_shape() {
    for (w, h) in [(640, 480), (224, 224), (1280, 720), (17, 301)] {
        let tensor = prepare(&noise_frame(w, h)).unwrap();
        assert_eq!(tensor.shape, INPUT_SHAPE.to_vec(), "input {}x{}", w, h);
        assert_eq!(tensor.len(), 224 * 224 * 3);
    }
}

#[test]
fn test_prepare_values_in_range() {
    let tensor = prepare(&noise_frame(320, 240)).unwrap();
    assert!(tensor.data.iter().all(|&v| (-1.0..=1.0).contains(&v)));
}

#[test]
fn test_prepare_maps_extremes() {
    let black = Tensor::filled(vec![10, 10, 3], 0u8).unwrap();
    let prepared = prepare(&black).unwrap();
    assert!(prepared.data.iter().all(|&v| v == -1.0));

    let white = Tensor::filled(vec![10, 10, 3], 255u8).unwrap();
    let prepared = prepare(&white).unwrap();
    assert!(prepared.data.iter().all(|&v| v == 1.0));
}

#[test]
fn test_prepare_maps_midpoint() {
    let frame = Tensor::filled(vec![224, 224, 3], 51u8).unwrap();
    let prepared = prepare(&frame).unwrap();
    // 51 / 127.5 - 1 = -0.6
    assert!(prepared.data.iter().all(|&v| (v + 0.6).abs() < 1e-6));
}

#[test]
fn test_prepare_is_deterministic() {
    let frame = noise_frame(97, 53);
    assert_eq!(prepare(&frame).unwrap(), prepare(&frame).unwrap());
}

#[test]
fn test_prepare_keeps_channel_order() {
    // pure red stays in channel 0 after resize
    let mut data = Vec::new();
    for _ in 0..8 * 8 {
        data.extend_from_slice(&[255u8, 0, 0]);
    }
    let frame = Tensor::new(vec![8, 8, 3], data).unwrap();
    let prepared = prepare(&frame).unwrap();

    assert_eq!(&prepared.data[0..3], &[1.0, -1.0, -1.0]);
}

#[test]
fn test_prepare_rejects_non_rgb_frame() {
    let gray = Tensor::new(vec![4, 4, 1], vec![0u8; 16]).unwrap();
    assert!(matches!(
        prepare(&gray),
        Err(InferError::ShapeMismatch { .. })
    ));

    let flat = Tensor::new(vec![48], vec![0u8; 48]).unwrap();
    assert!(matches!(
        prepare(&flat),
        Err(InferError::ShapeMismatch { .. })
    ));
}
