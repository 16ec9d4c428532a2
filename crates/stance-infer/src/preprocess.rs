use crate::InferError;
use stance_base::Tensor;
use stance_image::{resize, Filter, Frame};

/// Side length of the square model input.
pub const INPUT_SIZE: usize = 224;

/// NHWC input shape, batch of one.
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE, INPUT_SIZE, 3];

/// Turns a camera frame into the classifier input.
///
/// Resizes to 224x224 (bilinear), maps every sample with `v / 127.5 - 1` so `[0, 255]` lands on
/// `[-1, 1]`, and adds the batch axis. Output shape is `[1, 224, 224, 3]`.
pub fn prepare(frame: &Frame) -> Result<Tensor<f32>, InferError> {
    let resized = resize(frame, INPUT_SIZE, INPUT_SIZE, Filter::Bilinear)?;
    let normalized = resized.map(|&v| v as f32 / 127.5 - 1.0);
    Ok(normalized.insert_axis(0)?)
}
