use crate::{InferError, ModelSource, Session};

/// Turns a model file into a runnable [`Session`].
pub trait Backend {
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError>;
}
