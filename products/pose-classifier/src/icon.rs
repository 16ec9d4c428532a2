use stance_base::Tensor;
use stance_image::ImageError;

/// Converts an RGBA image `[h, w, 4]` into the X11 `_NET_WM_ICON` layout minifb takes:
/// width, height, then one ARGB word per pixel.
pub fn icon_buffer(rgba: &Tensor<u8>) -> Result<Vec<u64>, ImageError> {
    let (width, height) = match rgba.shape.as_slice() {
        &[h, w, 4] if h > 0 && w > 0 => (w, h),
        shape => {
            return Err(ImageError::Shape(format!(
                "expected non-empty [H, W, 4] icon, got {shape:?}"
            )));
        }
    };

    let mut buffer = Vec::with_capacity(2 + width * height);
    buffer.push(width as u64);
    buffer.push(height as u64);
    buffer.extend(rgba.data.chunks_exact(4).map(|px| {
        ((px[3] as u64) << 24) | ((px[0] as u64) << 16) | ((px[1] as u64) << 8) | px[2] as u64
    }));
    Ok(buffer)
}
