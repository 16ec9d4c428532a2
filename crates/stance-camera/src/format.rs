use crate::convert::yuyv_to_rgb;
use crate::CameraError;
use stance_base::Tensor;
use stance_image::Frame;

/// Pixel format negotiated with the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFormat {
    Mjpeg,
    Yuyv { width: u32, height: u32 },
}

impl CaptureFormat {
    /// Decodes one captured buffer into an RGB frame.
    pub fn decode(self, payload: &[u8]) -> Result<Frame, CameraError> {
        match self {
            CaptureFormat::Mjpeg => Ok(stance_image::decode_image(payload)?),
            CaptureFormat::Yuyv { width, height } => {
                let rgb = yuyv_to_rgb(payload, width, height).ok_or_else(|| {
                    CameraError::Stream(format!(
                        "YUYV frame too short: got {} bytes for {}x{}",
                        payload.len(),
                        width,
                        height
                    ))
                })?;
                Tensor::new(vec![height as usize, width as usize, 3], rgb)
                    .map_err(|e| CameraError::Stream(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_yuyv_decodes_to_rgb_frame() {
        let format = CaptureFormat::Yuyv { width: 2, height: 1 };
        let frame = format.decode(&[0, 128, 255, 128]).unwrap();
        assert_eq!(frame.shape, vec![1, 2, 3]);
        assert_eq!(frame.data, vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_yuyv_short_buffer_is_stream_error() {
        let format = CaptureFormat::Yuyv { width: 4, height: 2 };
        match format.decode(&[128u8; 10]) {
            Err(CameraError::Stream(msg)) => assert!(msg.contains("10 bytes for 4x2"), "{msg}"),
            other => panic!("expected stream error, got {other:?}"),
        }
    }

    #[test]
    fn test_mjpeg_decodes_to_rgb_frame() {
        let image = RgbImage::from_pixel(8, 4, Rgb([200, 200, 200]));
        let mut jpeg = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        let frame = CaptureFormat::Mjpeg.decode(&jpeg).unwrap();
        assert_eq!(frame.shape, vec![4, 8, 3]);
        assert!(frame.data.iter().all(|&v| v.abs_diff(200) <= 4));
    }

    #[test]
    fn test_mjpeg_garbage_is_decode_error() {
        let result = CaptureFormat::Mjpeg.decode(b"not a jpeg");
        assert!(matches!(result, Err(CameraError::Decode(_))));
    }
}
