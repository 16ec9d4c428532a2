use crate::preprocess::INPUT_SHAPE;
use crate::prediction::to_distribution;
use crate::{Backend, InferError, LabelSet, ModelSource, OnnxBackend, Prediction, Session};
use stance_base::Tensor;
use std::path::Path;

/// Pose classifier: a model session plus the labels naming its outputs.
///
/// Loaded once at startup and used for the rest of the process.
pub struct Classifier {
    session: Box<dyn Session>,
    labels: LabelSet,
    input_name: String,
}

impl Classifier {
    /// Loads the ONNX model at `model_path` and the label file at `labels_path`.
    ///
    /// # Errors
    ///
    /// Fails if either file is missing or malformed, or if the label count does not match the
    /// length of the model output.
    pub fn load(
        model_path: impl AsRef<Path>,
        labels_path: impl AsRef<Path>,
    ) -> Result<Self, InferError> {
        Self::load_with(&OnnxBackend::new(), model_path, labels_path)
    }

    /// Like [`Classifier::load`], with the model opened by `backend`.
    pub fn load_with(
        backend: &dyn Backend,
        model_path: impl AsRef<Path>,
        labels_path: impl AsRef<Path>,
    ) -> Result<Self, InferError> {
        let labels = LabelSet::load(labels_path)?;
        let session = backend.load_model(ModelSource::File(model_path.as_ref().to_path_buf()))?;
        Self::new(session, labels)
    }

    /// Wraps an already loaded session.
    ///
    /// Runs one trial inference on a zero tensor to check that the model emits exactly one
    /// score per label.
    pub fn new(mut session: Box<dyn Session>, labels: LabelSet) -> Result<Self, InferError> {
        let input_name = session
            .input_names()
            .first()
            .cloned()
            .ok_or_else(|| InferError::ModelLoad("model has no inputs".to_string()))?;

        let trial = Tensor::zeros(INPUT_SHAPE.to_vec())?;
        let outputs = session.run(&[(input_name.as_str(), trial)])?;
        let scores = first_output(outputs)?;
        if scores.len() != labels.len() {
            return Err(InferError::LabelCount {
                labels: labels.len(),
                outputs: scores.len(),
            });
        }

        Ok(Self {
            session,
            labels,
            input_name,
        })
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Classifies one prepared tensor of shape `[1, 224, 224, 3]`.
    pub fn classify(&mut self, input: Tensor<f32>) -> Result<Prediction, InferError> {
        if input.shape != INPUT_SHAPE {
            return Err(InferError::ShapeMismatch {
                expected: format!("{:?}", INPUT_SHAPE),
                got: format!("{:?}", input.shape),
            });
        }

        let outputs = self.session.run(&[(self.input_name.as_str(), input)])?;
        let raw = first_output(outputs)?;
        Prediction::new(to_distribution(&raw.data), &self.labels)
    }
}

fn first_output(outputs: Vec<(String, Tensor<f32>)>) -> Result<Tensor<f32>, InferError> {
    outputs
        .into_iter()
        .next()
        .map(|(_, tensor)| tensor)
        .ok_or_else(|| InferError::Backend("model produced no outputs".to_string()))
}
