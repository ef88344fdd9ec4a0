//! Crop Yield Prediction Platform - Backend
//!
//! Collects agricultural parameters, asks a hosted generative model for a
//! yield estimate and falls back to a deterministic scoring model whenever
//! that fails.

use axum::{routing::get, Router};
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use crate::error::{AppError, AppResult};
use crate::external::{GeminiClient, WeatherClient};
use crate::services::prediction::ThreadRngDraws;
use crate::services::{LocationService, PredictionService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub prediction: Arc<PredictionService>,
    pub location: LocationService,
}

impl AppState {
    /// Build every client once from process-wide configuration
    pub fn from_config(config: Config) -> AppResult<Self> {
        let gemini = GeminiClient::new(&config.gemini)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        if !config.gemini.is_configured() {
            tracing::warn!("No Gemini API key configured; every prediction will use the fallback estimator");
        }

        let prediction = PredictionService::new(
            Arc::new(gemini),
            Arc::new(ThreadRngDraws),
            Duration::from_secs(config.gemini.timeout_secs),
        );
        let location = LocationService::new(WeatherClient::new(&config.weather)?);

        Ok(Self {
            config: Arc::new(config),
            prediction: Arc::new(prediction),
            location,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Yield Prediction Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
