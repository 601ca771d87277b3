use axum::Json;
use cardio_core::{feature_catalog, FeatureCatalog};

/// GET /features - Field descriptions and an example request.
pub async fn list() -> Json<FeatureCatalog> {
    Json(feature_catalog())
}
