use ort::Error as OrtError;

/// Represents the different types of errors that can occur while loading or
/// running a toxicity model.
#[derive(Debug, thiserror::Error)]
pub enum ToxicityError {
    /// Error occurred while loading or using the tokenizer
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
    /// Error occurred while loading or running the ONNX model
    #[error("Model error: {0}")]
    Model(String),
    /// Error occurred while fetching or initializing the model (load rejected)
    #[error("Load error: {0}")]
    Load(String),
    /// Error occurred while running inference (classify rejected)
    #[error("Inference error: {0}")]
    Inference(String),
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<OrtError> for ToxicityError {
    fn from(err: OrtError) -> Self {
        ToxicityError::Model(err.to_string())
    }
}
