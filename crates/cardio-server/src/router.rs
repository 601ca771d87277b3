//! Route table and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use axum::routing::{get, post};
use axum::Router;
use cardio_config::ServerConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;
use crate::state::ServerState;

/// Permissive CORS unless the config names explicit origins.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

pub fn build_router(state: Arc<ServerState>, cors: CorsLayer) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/predict", post(handlers::predict::predict))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/", get(handlers::status::home).head(handlers::status::head))
        .route("/features", get(handlers::features::list))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use cardio_core::{PatientRecord, PredictionService, FEATURE_COUNT};
    use cardio_model::{ArtifactMetadata, LogisticRegression, StandardScaler};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Identity scaling and a classifier driven by Thallium alone:
    /// z = Thallium - 5, so 3 scores absence and 6/7 score presence.
    fn ready_app() -> Router {
        let scaler = StandardScaler::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]);
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[12] = 1.0;
        let classifier = LogisticRegression::new(coefficients, -5.0);
        let metadata = ArtifactMetadata {
            name: Some("test-model".into()),
            ..Default::default()
        };
        let state = ServerState::new(PredictionService::new(scaler, classifier), Some(metadata));
        build_router(Arc::new(state), cors_layer(&ServerConfig::default()))
    }

    fn unloaded_app() -> Router {
        let state = ServerState::new(PredictionService::unloaded(), None);
        build_router(Arc::new(state), cors_layer(&ServerConfig::default()))
    }

    fn predict_request(body: String) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn example_body() -> Value {
        serde_json::to_value(PatientRecord::example()).unwrap()
    }

    #[tokio::test]
    async fn test_status_reports_ready() {
        let (status, body) = send(ready_app(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Ready");
        assert_eq!(body["message"], "Heart Disease Prediction API");
        assert_eq!(body["endpoints"]["prediction"], "/predict");
        assert_eq!(body["model"]["name"], "test-model");
    }

    #[tokio::test]
    async fn test_status_reports_not_loaded() {
        let (status, body) = send(unloaded_app(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Model not loaded");
        assert!(body.get("model").is_none());
    }

    #[tokio::test]
    async fn test_head_root() {
        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let res = unloaded_app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["x-status"], "OK");
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let res = unloaded_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_features_available_without_model() {
        let (status, body) = send(unloaded_app(), get_request("/features")).await;
        assert_eq!(status, StatusCode::OK);
        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 13);
        assert_eq!(features[9]["name"], "STDepression");
        assert_eq!(features[9]["type"], "float");
        assert_eq!(body["example"]["Thallium"], 3);
    }

    #[tokio::test]
    async fn test_predict_documented_example() {
        let (status, body) = send(ready_app(), predict_request(example_body().to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], 1);
        assert_eq!(body["result"], "Heart Disease PRESENCE");

        let insights: Vec<&str> = body["clinical_insights"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(insights.contains(&"Thallium stress test shows reversible defect: High risk indicator"));
        assert!(insights.contains(&"No major vessels affected: Positive indicator"));
        assert!(insights.contains(&"Normal fasting blood sugar: Good indicator"));
        assert!(insights.contains(&"High maximum heart rate (141): Negative correlation with heart disease"));

        assert_eq!(body["input_features"]["Sex"], "Male");
        assert_eq!(body["input_features"]["Thallium"], "Reversible defect");
        assert_eq!(body["input_features"]["ExerciseAngina"], "No");
    }

    #[tokio::test]
    async fn test_predict_absence_and_percentages() {
        let mut record = example_body();
        record["Thallium"] = json!(3);
        let (status, body) = send(ready_app(), predict_request(record.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], 0);
        assert_eq!(body["result"], "Heart Disease ABSENCE");

        let pct = |key: &str| -> f64 {
            body["confidence_percentages"][key]
                .as_str()
                .unwrap()
                .trim_end_matches('%')
                .parse()
                .unwrap()
        };
        assert!((pct("heart disease") + pct("no heart disease") - 100.0).abs() <= 0.011);
        assert_eq!(body["confidence_percentages"]["heart disease"], "11.92%");
    }

    #[tokio::test]
    async fn test_predict_unknown_thallium_passes_through() {
        let mut record = example_body();
        record["Thallium"] = json!(99);
        let (status, body) = send(ready_app(), predict_request(record.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input_features"]["Thallium"], 99);
        let has_thallium_insight = body["clinical_insights"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v.as_str().unwrap().starts_with("Thallium"));
        assert!(!has_thallium_insight);
    }

    #[tokio::test]
    async fn test_predict_without_model_is_an_error() {
        let (status, body) = send(unloaded_app(), predict_request(example_body().to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Model or scaler not loaded properly");
    }

    #[tokio::test]
    async fn test_predict_validation_errors() {
        let mut missing = example_body();
        missing.as_object_mut().unwrap().remove("MaxHR");
        let (status, body) = send(ready_app(), predict_request(missing.to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("MaxHR"));

        let mut mistyped = example_body();
        mistyped["Age"] = json!("fifty");
        let (status, _) = send(ready_app(), predict_request(mistyped.to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(ready_app(), predict_request("{\"Age\": 57,".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let req = Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .body(Body::from(example_body().to_string()))
            .unwrap();
        let (status, _) = send(ready_app(), req).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_predict_is_idempotent() {
        let app = ready_app();
        let (_, first) = send(app.clone(), predict_request(example_body().to_string())).await;
        let (_, second) = send(app, predict_request(example_body().to_string())).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let req = Request::builder()
            .uri("/features")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let res = ready_app().oneshot(req).await.unwrap();
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_cors_restricted_origins() {
        let config = ServerConfig {
            cors_origins: vec!["https://app.example.com".into()],
            ..Default::default()
        };
        let state = ServerState::new(PredictionService::unloaded(), None);
        let app = build_router(Arc::new(state), cors_layer(&config));

        let req = Request::builder()
            .uri("/features")
            .header(header::ORIGIN, "https://app.example.com")
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example.com"
        );

        let req = Request::builder()
            .uri("/features")
            .header(header::ORIGIN, "https://evil.example.com")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
