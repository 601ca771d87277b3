use std::path::Path;

use cardio_core::PredictionService;
use cardio_model::ArtifactMetadata;

use crate::services::model::load_predictor;

/// Read-only state shared by every request.
pub struct ServerState {
    pub predictor: PredictionService,
    pub model_info: Option<ArtifactMetadata>,
}

impl ServerState {
    pub fn new(predictor: PredictionService, model_info: Option<ArtifactMetadata>) -> Self {
        Self { predictor, model_info }
    }

    /// Loads the artifact once; a failed load yields an unloaded predictor.
    pub fn from_artifact(path: &Path) -> Self {
        let (predictor, model_info) = load_predictor(path);
        Self::new(predictor, model_info)
    }

    pub fn status_label(&self) -> &'static str {
        if self.predictor.is_ready() {
            "Ready"
        } else {
            "Model not loaded"
        }
    }
}
