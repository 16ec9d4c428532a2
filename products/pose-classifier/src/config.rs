use stance_camera::CameraConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the pose classifier window.
///
/// Paths are relative to the working directory, matching the `./model` layout the model
/// export produces.
#[derive(Clone, Debug)]
pub struct AppConfig {
    model_path: PathBuf,
    labels_path: PathBuf,
    icon_path: PathBuf,
    title: String,
    window_width: usize,
    window_height: usize,
    window_position: (isize, isize),
    inference_threads: usize,
    refresh_interval: Duration,
    camera: CameraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./model/keras_model.onnx"),
            labels_path: PathBuf::from("./model/labels.txt"),
            icon_path: PathBuf::from("./model/image1.png"),
            title: "Pose Classifier".to_string(),
            window_width: 800,
            window_height: 800,
            window_position: (400, 400),
            inference_threads: 1,
            refresh_interval: Duration::from_millis(10),
            camera: CameraConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_labels_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.labels_path = path.into();
        self
    }

    /// Window icon; a missing or unreadable file only costs the icon.
    pub fn with_icon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.icon_path = path.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_window_size(mut self, width: usize, height: usize) -> Self {
        self.window_width = width.max(1);
        self.window_height = height.max(1);
        self
    }

    /// Top-left corner of the window on screen.
    pub fn with_window_position(mut self, x: isize, y: isize) -> Self {
        self.window_position = (x, y);
        self
    }

    /// Intra-op threads for ONNX Runtime.
    pub fn with_inference_threads(mut self, threads: usize) -> Self {
        self.inference_threads = threads.max(1);
        self
    }

    /// Period of the refresh loop. Ticks missed while a cycle runs are skipped, not queued.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn labels_path(&self) -> &Path {
        &self.labels_path
    }

    pub fn icon_path(&self) -> &Path {
        &self.icon_path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn window_width(&self) -> usize {
        self.window_width
    }

    pub fn window_height(&self) -> usize {
        self.window_height
    }

    pub fn window_position(&self) -> (isize, isize) {
        self.window_position
    }

    pub fn inference_threads(&self) -> usize {
        self.inference_threads
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Frame rate cap for the window, derived from the refresh interval.
    pub fn max_fps(&self) -> usize {
        (1000 / self.refresh_interval.as_millis().max(1)).max(1) as usize
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }
}
