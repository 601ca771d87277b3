//! Capabilities the prediction service needs from a fitted model.

use crate::error::PredictionError;
use crate::record::FeatureVector;

/// Output of a binary classifier for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Predicted class, 0 or 1.
    pub label: u8,
    /// `[P(class 0), P(class 1)]`.
    pub probabilities: [f64; 2],
}

/// Maps a raw feature vector to the scaled vector the classifier was fit on.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, PredictionError>;
}

/// Maps a scaled feature vector to a class label and probability pair.
pub trait BinaryClassifier: Send + Sync {
    fn classify(&self, scaled: &FeatureVector) -> Result<Classification, PredictionError>;
}
