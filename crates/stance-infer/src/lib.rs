//! Pose classification for the stance pipeline.
//!
//! A `Classifier` pairs a model `Session` with the `LabelSet` naming its outputs. Frames go
//! through `prepare` to become the `[1, 224, 224, 3]` input tensor, and `classify` turns the
//! model output into a `Prediction`.

pub mod backend;
pub mod backends;
pub mod classifier;
pub mod error;
pub mod labels;
pub mod modelsource;
pub mod prediction;
pub mod preprocess;
pub mod session;

pub use backend::Backend;
pub use backends::onnx::OnnxBackend;
pub use classifier::Classifier;
pub use error::InferError;
pub use labels::LabelSet;
pub use modelsource::ModelSource;
pub use prediction::{to_distribution, Prediction};
pub use preprocess::{prepare, INPUT_SHAPE, INPUT_SIZE};
pub use session::Session;
