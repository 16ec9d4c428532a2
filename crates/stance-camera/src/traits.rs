use crate::CameraError;
use stance_image::Frame;

/// Camera backend.
///
/// `recv` returns decoded RGB frames in HWC layout `[height, width, 3]`.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame from the camera.
    async fn recv(&mut self) -> Result<Frame, CameraError>;

    /// Release the device handle. Must tolerate being called more than once.
    fn release(&mut self);
}
