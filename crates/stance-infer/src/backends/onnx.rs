use crate::{Backend, InferError, ModelSource, Session};
use ndarray::ArrayD;
use ort::session::builder::GraphOptimizationLevel;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use stance_base::Tensor;

/// ONNX Runtime backend, CPU execution provider.
pub struct OnnxBackend {
    intra_threads: usize,
}

impl Default for OnnxBackend {
    fn default() -> Self {
        Self { intra_threads: 1 }
    }
}

impl OnnxBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Threads used inside a single operator.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = threads.max(1);
        self
    }
}

impl Backend for OnnxBackend {
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let ModelSource::File(path) = model;
        if !path.is_file() {
            return Err(InferError::Io(format!(
                "model file not found: {}",
                path.display()
            )));
        }

        let builder = OrtSession::builder()
            .map_err(|e| InferError::Backend(format!("failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferError::Backend(format!("failed to set optimization level: {}", e)))?
            .with_intra_threads(self.intra_threads)
            .map_err(|e| InferError::Backend(format!("failed to set thread count: {}", e)))?;

        log::debug!("loading ONNX model from {}", path.display());
        let session = builder
            .commit_from_file(&path)
            .map_err(|e| InferError::ModelLoad(format!("{}: {}", path.display(), e)))?;

        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        log::info!(
            "ONNX model loaded, inputs {:?}, outputs {:?}",
            input_names,
            output_names
        );

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<Vec<(String, Tensor<f32>)>, InferError> {
        // classification models here take exactly one image input
        let [(name, tensor)] = inputs else {
            return Err(InferError::Backend(format!(
                "expected exactly 1 input, got {}",
                inputs.len()
            )));
        };
        if !self.input_names.iter().any(|n| n == name) {
            return Err(InferError::Backend(format!(
                "unknown input '{}', model expects {:?}",
                name, self.input_names
            )));
        }

        let array = tensor_to_ndarray(tensor)?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Backend(format!("failed to create tensor ref: {}", e)))?;
        let outputs = self
            .session
            .run(inputs![*name => tensor_ref])
            .map_err(|e| InferError::Backend(format!("inference failed: {}", e)))?;

        let mut result = Vec::with_capacity(self.output_names.len());
        for output_name in &self.output_names {
            let array = outputs[output_name.as_str()]
                .try_extract_array::<f32>()
                .map_err(|e| {
                    InferError::Backend(format!("output '{}' is not f32: {}", output_name, e))
                })?;
            let shape = array.shape().to_vec();
            let data = array.iter().copied().collect();
            result.push((output_name.clone(), Tensor::new(shape, data)?));
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

fn tensor_to_ndarray(tensor: &Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape.clone(), tensor.data.clone())
        .map_err(|e| InferError::Backend(format!("failed to create ndarray from tensor: {}", e)))
}
