pub mod logging;
pub mod tensor;

pub use logging::{init_console_logger, ConsoleLogger};
pub use tensor::{Tensor, TensorError};
