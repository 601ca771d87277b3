//! Service metadata and readiness.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::dto::{Endpoints, StatusResponse};
use crate::state::ServerState;

/// GET / - Service metadata and readiness.
pub async fn home(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Heart Disease Prediction API",
        version: "1.0",
        endpoints: Endpoints {
            prediction: "/predict",
            features: "/features",
            health: "/health",
        },
        status: state.status_label(),
        model: state.model_info.clone(),
    })
}

/// HEAD / - Liveness probe without a body.
pub async fn head() -> impl IntoResponse {
    (StatusCode::OK, [("x-status", "OK")])
}
