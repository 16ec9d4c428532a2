use stance_camera::yuyv_to_rgb;

#[test]
fn test_yuyv_gray_pair() {
    // two pixels, both Y=128 with neutral chroma
    let rgb = yuyv_to_rgb(&[128, 128, 128, 128], 2, 1).unwrap();
    assert_eq!(rgb, vec![128, 128, 128, 128, 128, 128]);
}

#[test]
fn test_yuyv_black_and_white() {
    let rgb = yuyv_to_rgb(&[0, 128, 255, 128], 2, 1).unwrap();
    assert_eq!(&rgb[0..3], &[0, 0, 0]);
    assert_eq!(&rgb[3..6], &[255, 255, 255]);
}

#[test]
fn test_yuyv_output_size() {
    let data = vec![128u8; 640 * 480 * 2];
    let rgb = yuyv_to_rgb(&data, 640, 480).unwrap();
    assert_eq!(rgb.len(), 640 * 480 * 3);
}

#[test]
fn test_yuyv_short_buffer() {
    assert!(yuyv_to_rgb(&[0u8; 7], 2, 2).is_none());
}

#[test]
fn test_yuyv_odd_width() {
    assert!(yuyv_to_rgb(&[0u8; 6], 3, 1).is_none());
}
