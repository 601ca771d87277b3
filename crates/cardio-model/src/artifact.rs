//! JSON artifact holding the fitted transform and classifier.

use std::fs;
use std::path::Path;

use cardio_core::{FeatureVector, PredictionService, FEATURE_COUNT, TRAINING_COLUMNS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logistic::LogisticRegression;
use crate::scaler::StandardScaler;

/// Artifact layout version understood by this loader.
pub const FORMAT_VERSION: u32 = 1;

/// Errors from reading or validating an artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported artifact format version: {0}")]
    UnsupportedVersion(u32),

    #[error("Model or scaler not found in artifact (model missing: {model_missing}, scaler missing: {scaler_missing})")]
    Incomplete {
        scaler_missing: bool,
        model_missing: bool,
    },

    #[error("{component} has {actual} values, expected {expected}")]
    Shape {
        component: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{component} contains non-finite values")]
    NonFinite { component: &'static str },

    #[error("Feature {index} is {actual:?}, expected {expected:?}")]
    FeatureMismatch {
        index: usize,
        expected: &'static str,
        actual: String,
    },
}

/// Serialized standardization parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default = "default_true")]
    pub with_mean: bool,
    #[serde(default = "default_true")]
    pub with_std: bool,
}

fn default_true() -> bool {
    true
}

/// Serialized classifier parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierParams {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

/// Descriptive information about how the artifact was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_accuracy: Option<f64>,
}

/// On-disk artifact. `scaler` and `model` may be absent or null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_version")]
    pub format_version: u32,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(default)]
    pub scaler: Option<ScalerParams>,
    #[serde(default)]
    pub model: Option<ClassifierParams>,
    #[serde(default)]
    pub metadata: Option<ArtifactMetadata>,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

/// A validated artifact, ready to serve.
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub scaler: StandardScaler,
    pub classifier: LogisticRegression,
    pub metadata: Option<ArtifactMetadata>,
}

impl LoadedArtifact {
    /// Moves the transform and classifier into a ready prediction service.
    pub fn into_service(self) -> (PredictionService, Option<ArtifactMetadata>) {
        (
            PredictionService::new(self.scaler, self.classifier),
            self.metadata,
        )
    }
}

impl ModelArtifact {
    pub fn from_json(content: &str) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Checks every invariant and builds the concrete transform and classifier.
    pub fn validate(self) -> Result<LoadedArtifact, ArtifactError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion(self.format_version));
        }

        let (scaler, model) = match (self.scaler, self.model) {
            (Some(s), Some(m)) => (s, m),
            (s, m) => {
                return Err(ArtifactError::Incomplete {
                    scaler_missing: s.is_none(),
                    model_missing: m.is_none(),
                })
            }
        };

        if let Some(names) = &self.feature_names {
            check_feature_names(names)?;
        }

        let mean = to_vector("scaler.mean", &scaler.mean)?;
        let scale = to_vector("scaler.scale", &scaler.scale)?;
        let scaler = StandardScaler::new(mean, scale)
            .with_mean(scaler.with_mean)
            .with_std(scaler.with_std);

        let classifier = match model {
            ClassifierParams::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if !intercept.is_finite() {
                    return Err(ArtifactError::NonFinite {
                        component: "model.intercept",
                    });
                }
                LogisticRegression::new(to_vector("model.coefficients", &coefficients)?, intercept)
            }
        };

        Ok(LoadedArtifact {
            scaler,
            classifier,
            metadata: self.metadata,
        })
    }
}

/// Reads and validates the artifact at `path`.
pub fn load_artifact(path: impl AsRef<Path>) -> Result<LoadedArtifact, ArtifactError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Reading model artifact");
    let content = fs::read_to_string(path)?;
    ModelArtifact::from_json(&content)?.validate()
}

fn to_vector(component: &'static str, values: &[f64]) -> Result<FeatureVector, ArtifactError> {
    let vector: FeatureVector = values.try_into().map_err(|_| ArtifactError::Shape {
        component,
        expected: FEATURE_COUNT,
        actual: values.len(),
    })?;
    if vector.iter().any(|v| !v.is_finite()) {
        return Err(ArtifactError::NonFinite { component });
    }
    Ok(vector)
}

fn check_feature_names(names: &[String]) -> Result<(), ArtifactError> {
    if names.len() != FEATURE_COUNT {
        return Err(ArtifactError::Shape {
            component: "feature_names",
            expected: FEATURE_COUNT,
            actual: names.len(),
        });
    }
    for (index, (actual, expected)) in names.iter().zip(TRAINING_COLUMNS).enumerate() {
        if actual != expected {
            return Err(ArtifactError::FeatureMismatch {
                index,
                expected,
                actual: actual.clone(),
            });
        }
    }
    Ok(())
}
