use pose_classifier::icon::icon_buffer;
use stance_base::Tensor;

#[test]
fn test_icon_buffer_layout() {
    // one row, two pixels: opaque red, half-transparent blue
    let rgba = Tensor::new(vec![1, 2, 4], vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
    let buffer = icon_buffer(&rgba).unwrap();
    assert_eq!(buffer, vec![2, 1, 0xFFFF_0000, 0x8000_00FF]);
}

#[test]
fn test_icon_buffer_rejects_rgb() {
    let rgb = Tensor::new(vec![1, 1, 3], vec![0u8; 3]).unwrap();
    assert!(icon_buffer(&rgb).is_err());
}
