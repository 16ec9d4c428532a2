//! Camera capture for the stance pipeline.
//!
//! `Camera` is the backend trait (async frame receive plus explicit release), `FrameSource`
//! wraps a backend for the refresh loop: it turns read failures into absent frames, mirrors
//! frames, and guarantees a single device release.

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod source;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use convert::yuyv_to_rgb;
pub use error::CameraError;
pub use format::CaptureFormat;
pub use source::FrameSource;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
