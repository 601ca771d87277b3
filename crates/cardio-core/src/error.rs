use thiserror::Error;

/// Errors raised while producing a prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The artifact was not available at startup.
    #[error("Model or scaler not loaded properly")]
    ModelNotLoaded,

    /// The standardization transform rejected the feature vector.
    #[error("Prediction error: scaling failed: {0}")]
    Scaling(String),

    /// The classifier failed or returned an invalid output.
    #[error("Prediction error: classification failed: {0}")]
    Classification(String),
}

impl PredictionError {
    /// Creates a Scaling error from any error type.
    pub fn scaling(e: impl std::fmt::Display) -> Self {
        PredictionError::Scaling(e.to_string())
    }

    /// Creates a Classification error from any error type.
    pub fn classification(e: impl std::fmt::Display) -> Self {
        PredictionError::Classification(e.to_string())
    }
}
