//! Prediction result models

use serde::{Deserialize, Serialize};

use crate::estimator::FALLBACK_MODEL_LABEL;

/// Number of input dimensions every prediction considers
pub const FACTORS_ANALYZED: u32 = 10;

/// Structured yield estimate returned to the UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub predicted_yield_kg_per_hectare: i64,
    pub confidence_score: f64,
    pub model_used: String,
    pub factors_analyzed: u32,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

/// Which code path produced a prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    External,
    Fallback,
}

impl PredictionResult {
    pub fn source(&self) -> PredictionSource {
        if self.model_used == FALLBACK_MODEL_LABEL {
            PredictionSource::Fallback
        } else {
            PredictionSource::External
        }
    }
}

/// Descriptor of the model backing the prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub model_type: String,
    pub version: String,
    pub capabilities: String,
    pub feature_count: u32,
    pub fallback_model: String,
}
