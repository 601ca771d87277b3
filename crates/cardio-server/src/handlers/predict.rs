//! Prediction handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use cardio_core::{PatientRecord, PredictionResult};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::ServerState;

/// POST /predict - Score one patient record.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<PatientRecord>, JsonRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    let Json(record) = payload.map_err(|rejection| {
        warn!("Rejected prediction request: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    let prediction_id = Uuid::new_v4();
    debug!(%prediction_id, ?record, "Received prediction request");

    let result = state.predictor.predict(&record).map_err(|e| {
        error!(%prediction_id, "{}", e);
        AppError::from(e)
    })?;

    info!(
        %prediction_id,
        prediction = result.prediction,
        presence = result.probabilities[1],
        insights = result.clinical_insights.len(),
        "Prediction complete"
    );
    Ok(Json(result))
}
