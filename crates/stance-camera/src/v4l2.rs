use crate::{Camera, CameraConfig, CameraError, CaptureFormat};
use stance_image::Frame;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

type FrameResult = Result<Frame, CameraError>;

const ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// V4L2 camera.
///
/// The device is opened and configured in `new`; streaming starts on the first `recv`, on a
/// capture thread that decodes frames and hands them over through a bounded channel.
pub struct V4l2Camera {
    config: CameraConfig,
    format: CaptureFormat,
    device: Option<Device>,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
    released: bool,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("format", &self.format)
            .field("device", &self.device.is_some())
            .field("receiver", &self.receiver.is_some())
            .field("thread_handle", &self.thread_handle.is_some())
            .field("released", &self.released)
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("Receiver not initialized".to_string()))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| CameraError::Channel("capture thread terminated".to_string()))?
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        // Dropping the receiver makes the capture thread's next send fail, which ends its loop
        drop(self.receiver.take());
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("capture thread panicked");
            }
        }
        drop(self.device.take());
        log::debug!("released {}", self.config.device());
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        self.release();
    }
}

impl V4l2Camera {
    /// Open the device at `config.device()` and negotiate a pixel format.
    ///
    /// MJPEG is preferred; YUYV is used when the device refuses MJPEG. The frame rate is a
    /// request, drivers may round it.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the device cannot be opened, supports neither format,
    /// or rejects the parameters.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())?;
        let format = Self::negotiate_format(&device, &config)?;

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        log::info!(
            "opened {} as {:?} at {}x{} @ {} fps",
            config.device(),
            format,
            config.width(),
            config.height(),
            config.fps()
        );

        Ok(Self {
            config,
            format,
            device: Some(device),
            receiver: None,
            thread_handle: None,
            released: false,
        })
    }

    fn negotiate_format(device: &Device, config: &CameraConfig) -> Result<CaptureFormat, CameraError> {
        let mjpeg = Format::new(config.width(), config.height(), FourCC::new(b"MJPG"));
        let actual = Capture::set_format(device, &mjpeg)?;
        if actual.fourcc == FourCC::new(b"MJPG") {
            return Ok(CaptureFormat::Mjpeg);
        }

        log::debug!("device refused MJPEG (got {}), trying YUYV", actual.fourcc);
        let yuyv = Format::new(config.width(), config.height(), FourCC::new(b"YUYV"));
        let actual = Capture::set_format(device, &yuyv)?;
        if actual.fourcc == FourCC::new(b"YUYV") {
            // the driver may have picked a different size
            return Ok(CaptureFormat::Yuyv {
                width: actual.width,
                height: actual.height,
            });
        }

        Err(CameraError::Device(
            "no supported pixel format (tried MJPEG and YUYV)".to_string(),
        ))
    }

    /// Start the capture thread if not already running.
    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.released {
            return Err(CameraError::Released);
        }
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("Device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count();
        let format = self.format;
        let (tx, rx) = mpsc::channel(buffer_count as usize);

        let handle = thread::Builder::new()
            .name("v4l2-capture".to_string())
            .spawn(move || {
                if let Err(e) = Self::capture_loop(device, format, tx, buffer_count) {
                    log::error!("capture thread error: {}", e);
                }
            })?;

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);

        Ok(())
    }

    /// Reads frames until the receiver is dropped. Frames are dropped while the channel is full.
    fn capture_loop(
        device: Device,
        format: CaptureFormat,
        tx: mpsc::Sender<FrameResult>,
        buffer_count: u32,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count)?;

        loop {
            let result = match CaptureStream::next(&mut stream) {
                Ok((buf, meta)) => {
                    let used = (meta.bytesused as usize).min(buf.len());
                    let payload = if used == 0 { buf } else { &buf[..used] };
                    format.decode(payload)
                }
                Err(e) => {
                    // an unplugged device fails immediately, don't spin
                    thread::sleep(ERROR_BACKOFF);
                    Err(CameraError::Stream(e.to_string()))
                }
            };

            match tx.try_send(result) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    // consumer is busy with inference, drop this frame
                }
                Err(mpsc::error::TrySendError::Closed(_)) => break,
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
