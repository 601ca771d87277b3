//! HTTP route handlers for the prediction server.

pub mod features;
pub mod predict;
pub mod status;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
