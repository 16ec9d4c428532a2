//! Frame utilities for the stance pipeline.
//!
//! Thin wrapper around the `image` crate: decoding camera payloads and asset files into
//! `Tensor<u8>`, resampling, and mirroring. Every frame uses HWC layout `[height, width, 3]`
//! with RGB samples.

pub mod error;

pub use error::ImageError;

use crates_image::imageops::{self, FilterType};
use crates_image::RgbImage;
use stance_base::Tensor;
use std::path::Path;

/// One captured camera image, `[height, width, 3]` RGB.
pub type Frame = Tensor<u8>;

/// Resampling policy for [`resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Bilinear,
}

impl From<Filter> for FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => FilterType::Nearest,
            Filter::Bilinear => FilterType::Triangle,
        }
    }
}

/// Returns `(width, height)` of an RGB frame.
///
/// # Errors
///
/// Returns `ImageError::Shape` unless the frame is `[H, W, 3]` with non-zero sides.
pub fn frame_size(frame: &Frame) -> Result<(usize, usize), ImageError> {
    match frame.shape.as_slice() {
        &[h, w, 3] if h > 0 && w > 0 => Ok((w, h)),
        shape => Err(ImageError::Shape(format!(
            "expected non-empty [H, W, 3] frame, got {shape:?}"
        ))),
    }
}

/// Decodes an encoded image (JPEG/MJPEG, PNG, BMP) into an RGB frame.
///
/// Grayscale and alpha variants are converted to RGB, 16-bit images are narrowed to 8 bits.
pub fn decode_image(data: &[u8]) -> Result<Frame, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.into_rgb8();
    rgb_image_to_frame(rgb)
}

/// Loads an image file as RGBA, `[height, width, 4]`. Used for window icons.
pub fn load_rgba(path: impl AsRef<Path>) -> Result<Tensor<u8>, ImageError> {
    let rgba = crates_image::open(path.as_ref())?.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Tensor::new(
        vec![height as usize, width as usize, 4],
        rgba.into_raw(),
    )?)
}

/// Resamples a frame to `width` x `height`.
///
/// Pure and deterministic: the same input always yields the same output.
pub fn resize(frame: &Frame, width: usize, height: usize, filter: Filter) -> Result<Frame, ImageError> {
    let (src_w, src_h) = frame_size(frame)?;
    if width == 0 || height == 0 {
        return Err(ImageError::Shape(format!(
            "cannot resize to {width}x{height}"
        )));
    }
    if (src_w, src_h) == (width, height) {
        return Ok(frame.clone());
    }

    let src = RgbImage::from_raw(src_w as u32, src_h as u32, frame.data.clone())
        .ok_or_else(|| ImageError::Shape("frame buffer smaller than its shape".to_string()))?;
    let resized = imageops::resize(&src, width as u32, height as u32, filter.into());
    rgb_image_to_frame(resized)
}

/// Mirrors a frame left-to-right in place.
pub fn flip_horizontal(frame: &mut Frame) -> Result<(), ImageError> {
    let (width, height) = frame_size(frame)?;
    if frame.data.len() != width * height * 3 {
        return Err(ImageError::Shape("frame buffer does not match its shape".to_string()));
    }
    let data = std::mem::take(&mut frame.data);
    let mut rgb = RgbImage::from_raw(width as u32, height as u32, data)
        .ok_or_else(|| ImageError::Shape("frame buffer does not match its shape".to_string()))?;
    imageops::flip_horizontal_in_place(&mut rgb);
    frame.data = rgb.into_raw();
    Ok(())
}

fn rgb_image_to_frame(rgb: RgbImage) -> Result<Frame, ImageError> {
    let (width, height) = rgb.dimensions();
    Ok(Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?)
}
