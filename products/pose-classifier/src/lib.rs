//! Desktop pose classifier.
//!
//! Every refresh tick reads a camera frame, classifies the pose in it and redraws the
//! dashboard: the live view, a bar chart of all class scores, and the winning class.

pub mod canvas;
pub mod config;
pub mod dashboard;
pub mod icon;
pub mod refresh;
pub mod widgets;

pub use canvas::Canvas;
pub use config::AppConfig;
pub use dashboard::{Dashboard, Layout};
pub use refresh::{ticker, CycleOutcome, CyclePhase, CycleStats, RefreshLoop};
pub use widgets::{result_text, CloseButton, RenderSurface, ResultLabel, ScoreChart};
