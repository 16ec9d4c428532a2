use std::fmt;

#[derive(Debug)]
pub enum InferError {
    Io(String),
    ModelLoad(String),
    Backend(String),
    Labels(String),
    LabelCount { labels: usize, outputs: usize },
    ShapeMismatch { expected: String, got: String },
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::Labels(msg) => write!(f, "label file error: {msg}"),
            InferError::LabelCount { labels, outputs } => write!(
                f,
                "label file has {labels} labels but the model produces {outputs} scores"
            ),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<stance_base::TensorError> for InferError {
    fn from(err: stance_base::TensorError) -> Self {
        InferError::Backend(err.to_string())
    }
}

impl From<stance_image::ImageError> for InferError {
    fn from(err: stance_image::ImageError) -> Self {
        match err {
            stance_image::ImageError::Shape(msg) => InferError::ShapeMismatch {
                expected: "[H, W, 3] frame".to_string(),
                got: msg,
            },
            other => InferError::Backend(other.to_string()),
        }
    }
}
