use std::io::ErrorKind;
use std::path::Path;

use cardio_core::PredictionService;
use cardio_model::{load_artifact, ArtifactError, ArtifactMetadata};
use tracing::{error, info, warn};

/// Loads the artifact at `path`. Never fails: problems are logged and an
/// unloaded predictor is returned.
pub fn load_predictor(path: &Path) -> (PredictionService, Option<ArtifactMetadata>) {
    let err = match load_artifact(path) {
        Ok(artifact) => {
            info!("Model and scaler loaded successfully from {}", path.display());
            return artifact.into_service();
        }
        Err(e) => e,
    };

    match &err {
        ArtifactError::Io(io) if io.kind() == ErrorKind::NotFound => {
            warn!("Model file not found at {}", path.display());
        }
        ArtifactError::Incomplete {
            scaler_missing,
            model_missing,
        } => {
            warn!("Model or scaler not found in artifact {}", path.display());
            if *model_missing {
                warn!("  - Model not found");
            }
            if *scaler_missing {
                warn!("  - Scaler not found");
            }
        }
        _ => {
            error!("Error loading model from {}: {}", path.display(), err);
        }
    }

    (PredictionService::unloaded(), None)
}
