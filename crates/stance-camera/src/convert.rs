/// Converts one BT.601 YUV sample to RGB.
fn yuv_to_rgb(y: f32, u: f32, v: f32) -> [u8; 3] {
    let (u, v) = (u - 128.0, v - 128.0);
    [
        (y + 1.402 * v).clamp(0.0, 255.0) as u8,
        (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8,
        (y + 1.772 * u).clamp(0.0, 255.0) as u8,
    ]
}

/// Converts packed YUYV (YUV 4:2:2) data to RGB.
///
/// YUYV packs two pixels in four bytes, `[Y0, U, Y1, V]`, sharing U and V.
/// Returns `None` if `data` holds fewer than `width * height * 2` bytes or `width` is odd.
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    if width % 2 != 0 {
        return None;
    }
    let pixel_count = (width as usize) * (height as usize);
    let expected_len = pixel_count * 2;
    if data.len() < expected_len {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for quad in data[..expected_len].chunks_exact(4) {
        let [y0, u, y1, v] = [quad[0], quad[1], quad[2], quad[3]].map(f32::from);
        rgb.extend_from_slice(&yuv_to_rgb(y0, u, v));
        rgb.extend_from_slice(&yuv_to_rgb(y1, u, v));
    }
    Some(rgb)
}
