use crate::{Camera, CameraError};
use stance_image::{flip_horizontal, frame_size, Frame};

/// Frame producer for the refresh loop.
///
/// `acquire` never fails: a missing device, a read error or a malformed frame all come back as
/// `None`, and the caller simply skips its cycle. The device is released exactly once, either by
/// an explicit `release` or on drop.
pub struct FrameSource<C: Camera> {
    camera: Option<C>,
    mirror: bool,
    consecutive_failures: u64,
}

impl<C: Camera> FrameSource<C> {
    pub fn new(camera: C) -> Self {
        Self {
            camera: Some(camera),
            mirror: false,
            consecutive_failures: 0,
        }
    }

    /// A source whose device could not be opened; every `acquire` yields `None`.
    pub fn unavailable() -> Self {
        Self {
            camera: None,
            mirror: false,
            consecutive_failures: 0,
        }
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// `false` once released, or if the device never opened.
    pub fn is_available(&self) -> bool {
        self.camera.is_some()
    }

    /// Number of failed reads since the last good frame.
    pub fn consecutive_failures(&self) -> u64 {
        self.consecutive_failures
    }

    /// Read one frame.
    pub async fn acquire(&mut self) -> Option<Frame> {
        let camera = self.camera.as_mut()?;

        let result: Result<Frame, CameraError> = match camera.recv().await {
            Ok(mut frame) => match frame_size(&frame) {
                Ok(_) if self.mirror => flip_horizontal(&mut frame)
                    .map(|_| frame)
                    .map_err(CameraError::from),
                Ok(_) => Ok(frame),
                Err(err) => Err(CameraError::from(err)),
            },
            Err(err) => Err(err),
        };

        match result {
            Ok(frame) => {
                if self.consecutive_failures > 0 {
                    log::info!(
                        "camera recovered after {} failed reads",
                        self.consecutive_failures
                    );
                }
                self.consecutive_failures = 0;
                Some(frame)
            }
            Err(err) => {
                self.consecutive_failures += 1;
                // only the first failure of a streak is worth a warning
                if self.consecutive_failures == 1 {
                    log::warn!("camera read failed, skipping cycle: {}", err);
                } else {
                    log::debug!(
                        "camera read failed ({} in a row): {}",
                        self.consecutive_failures,
                        err
                    );
                }
                None
            }
        }
    }

    /// Release the device. Later calls, and the drop, are no-ops.
    pub fn release(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            camera.release();
            log::info!("camera released");
        }
    }
}

impl<C: Camera> Drop for FrameSource<C> {
    fn drop(&mut self) {
        self.release();
    }
}
