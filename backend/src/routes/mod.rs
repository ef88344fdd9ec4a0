//! Route definitions for the Crop Yield Prediction Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/model-info", get(handlers::get_model_info))
        .route("/normalize", post(handlers::normalize_form))
        // Prediction
        .route("/predict", post(handlers::predict_yield))
        .route("/predict/form", post(handlers::predict_from_form))
        // Location prefill (peripheral)
        .route("/location/prefill", get(handlers::get_location_prefill))
}
