//! HTTP API integration tests
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crop_yield_backend::config::WeatherConfig;
use crop_yield_backend::external::{CompletionError, TextCompletionProvider, WeatherClient};
use crop_yield_backend::services::prediction::{FixedDraws, PredictionService};
use crop_yield_backend::services::LocationService;
use crop_yield_backend::{create_app, AppState, Config};
use shared::{FallbackDraw, FALLBACK_MODEL_LABEL};

struct UnavailableProvider;

#[async_trait]
impl TextCompletionProvider for UnavailableProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::NotConfigured)
    }

    fn model_name(&self) -> &str {
        "Gemini AI Agricultural Model"
    }

    fn is_configured(&self) -> bool {
        false
    }
}

fn test_app() -> Router {
    // Nothing listens on the discard port, so weather lookups fail fast
    let weather = WeatherConfig {
        api_endpoint: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    };

    let state = AppState {
        config: Arc::new(Config::default()),
        prediction: Arc::new(PredictionService::new(
            Arc::new(UnavailableProvider),
            Arc::new(FixedDraws(FallbackDraw::NEUTRAL)),
            Duration::from_secs(1),
        )),
        location: LocationService::new(WeatherClient::new(&weather).unwrap()),
    };
    create_app(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_and_health() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_configured"], false);
}

#[tokio::test]
async fn test_predict_returns_fallback_result() {
    let request = post_json(
        "/api/v1/predict",
        json!({
            "rainfall": 100, "temperature": 25, "humidity": 50,
            "soil_type": "loamy", "soil_ph": 6.5, "fertilizer_use": "high",
            "irrigation": "drip", "pest_control": true, "disease_presence": false,
            "crop_variety": "hybrid-maize"
        }),
    );
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["predicted_yield_kg_per_hectare"], 5800);
    assert_eq!(body["confidence_score"], 0.65);
    assert_eq!(body["model_used"], FALLBACK_MODEL_LABEL);
    assert_eq!(body["factors_analyzed"], 10);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(body["risk_factors"], json!([]));
}

#[tokio::test]
async fn test_predict_booleans_default_to_false() {
    let request = post_json(
        "/api/v1/predict",
        json!({
            "rainfall": 100, "temperature": 25, "humidity": 50,
            "soil_type": "loamy", "soil_ph": 6.5, "fertilizer_use": "high",
            "irrigation": "drip", "crop_variety": "hybrid-maize"
        }),
    );
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // Same as the best case minus pest control
    assert_eq!(body["predicted_yield_kg_per_hectare"], 5600);
}

#[tokio::test]
async fn test_predict_rejects_malformed_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_predict_from_form_normalizes_first() {
    let request = post_json(
        "/api/v1/predict/form",
        json!({
            "rainfall": "0", "temperature": "", "humidity": "0",
            "soilType": "sandy", "soilPh": "0", "fertilizerUse": "none",
            "irrigation": "none", "pestControl": false, "cropVariety": "x",
            "diseasePresence": true
        }),
    );
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // Blank temperature reads as 0; with pH 0 this is the extreme-low case
    assert_eq!(body["predicted_yield_kg_per_hectare"], 800);
}

#[tokio::test]
async fn test_predict_from_form_blank_ph_uses_default() {
    let request = post_json(
        "/api/v1/predict/form",
        json!({
            "rainfall": "0", "temperature": "", "humidity": "0",
            "soilType": "sandy", "soilPh": "", "fertilizerUse": "none",
            "irrigation": "none", "pestControl": false, "cropVariety": "x",
            "diseasePresence": true
        }),
    );
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // Blank pH reads as 6.5, worth 650 more than pH 0
    assert_eq!(body["predicted_yield_kg_per_hectare"], 1450);
}

#[tokio::test]
async fn test_normalize_endpoint() {
    let request = post_json(
        "/api/v1/normalize",
        json!({"rainfall": "abc", "soilPh": "oops", "temperature": "21.5C", "soilType": "volcanic"}),
    );
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["rainfall"], 0.0);
    assert_eq!(body["soil_ph"], 6.5);
    assert_eq!(body["temperature"], 21.5);
    assert_eq!(body["soil_type"], "volcanic");
    assert_eq!(body["pest_control"], false);
}

#[tokio::test]
async fn test_model_info_endpoint() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/model-info")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["model_type"], "Gemini AI Agricultural Model");
    assert_eq!(body["feature_count"], 10);
}

#[tokio::test]
async fn test_location_prefill_validates_coordinates() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/location/prefill?latitude=95&longitude=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "latitude");
}

#[tokio::test]
async fn test_location_prefill_weather_outage() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/location/prefill?latitude=13.7&longitude=100.5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "WEATHER_SERVICE_UNAVAILABLE");
}
