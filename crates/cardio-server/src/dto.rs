use cardio_model::ArtifactMetadata;
use serde::Serialize;

// === HTTP DTOs ===

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub prediction: &'static str,
    pub features: &'static str,
    pub health: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ArtifactMetadata>,
}
