//! HTTP handlers for crop yield prediction

use axum::{extract::State, Json};
use shared::{normalize, CropFormData, CropInputRecord, ModelInfo, PredictionResult};
use tracing::Instrument;
use uuid::Uuid;

use crate::AppState;

/// Predict yield for an already normalized record
pub async fn predict_yield(
    State(state): State<AppState>,
    Json(record): Json<CropInputRecord>,
) -> Json<PredictionResult> {
    let request_id = Uuid::new_v4();
    let result = state
        .prediction
        .predict(&record)
        .instrument(tracing::info_span!("prediction", %request_id))
        .await;
    tracing::info!(
        %request_id,
        model = %result.model_used,
        source = ?result.source(),
        predicted_yield = result.predicted_yield_kg_per_hectare,
        "Prediction served"
    );
    Json(result)
}

/// Normalize raw form fields, then predict
pub async fn predict_from_form(
    State(state): State<AppState>,
    Json(form): Json<CropFormData>,
) -> Json<PredictionResult> {
    let record = normalize(&form);
    predict_yield(State(state), Json(record)).await
}

/// Show how raw form fields are normalized
pub async fn normalize_form(Json(form): Json<CropFormData>) -> Json<CropInputRecord> {
    Json(normalize(&form))
}

/// Describe the model behind the prediction endpoint
pub async fn get_model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.prediction.model_info())
}
