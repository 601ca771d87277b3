//! Application error types and Axum response conversion.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardio_core::PredictionError;
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Request body failed JSON decoding or type checks.
    Validation { status: StatusCode, message: String },
    /// The model is unavailable or scoring failed.
    Prediction(PredictionError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PredictionError> for AppError {
    fn from(e: PredictionError) -> Self {
        AppError::Prediction(e)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            AppError::Validation { message, .. } => message,
            AppError::Prediction(e) => e.to_string(),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}
