//! Fallback yield estimator
//!
//! A weighted linear scoring model used whenever the external model cannot
//! produce a usable prediction. The arithmetic is deterministic; randomness
//! enters only through a [`FallbackDraw`] supplied by the caller.

use crate::models::{CropInputRecord, PredictionResult, FACTORS_ANALYZED};

/// `model_used` label of every fallback result
pub const FALLBACK_MODEL_LABEL: &str = "Fallback Model (Gemini Unavailable)";

/// Starting point of the score before any term is applied
pub const BASE_YIELD: f64 = 2500.0;

/// Lowest yield the estimator will ever report (kg/ha)
pub const MIN_YIELD_KG_PER_HECTARE: f64 = 800.0;

/// Half-width of the uniform yield perturbation
pub const YIELD_NOISE_SPAN: f64 = 200.0;

/// Confidence before jitter
pub const BASE_CONFIDENCE: f64 = 0.65;

/// Upper bound of the uniform confidence jitter
pub const CONFIDENCE_JITTER_SPAN: f64 = 0.15;

/// Generic advisories attached to every fallback result
pub const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Consider optimizing irrigation schedule",
    "Monitor soil pH levels regularly",
    "Apply appropriate fertilizer based on soil test",
];

/// The random inputs of one fallback estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackDraw {
    /// Added to the yield score, within `[-200, 200]`
    pub yield_noise: f64,
    /// Added to the base confidence, within `[0, 0.15]`
    pub confidence_jitter: f64,
}

impl FallbackDraw {
    /// No perturbation at all; makes the estimate fully deterministic
    pub const NEUTRAL: FallbackDraw = FallbackDraw {
        yield_noise: 0.0,
        confidence_jitter: 0.0,
    };

    /// Create a draw, clamping both values into their allowed ranges
    pub fn new(yield_noise: f64, confidence_jitter: f64) -> Self {
        Self {
            yield_noise: clamp_or_zero(yield_noise, -YIELD_NOISE_SPAN, YIELD_NOISE_SPAN),
            confidence_jitter: clamp_or_zero(confidence_jitter, 0.0, CONFIDENCE_JITTER_SPAN),
        }
    }

    /// Map two uniform samples from `[0, 1)` onto the draw ranges
    pub fn from_unit(noise_unit: f64, jitter_unit: f64) -> Self {
        Self::new(
            noise_unit * 2.0 * YIELD_NOISE_SPAN - YIELD_NOISE_SPAN,
            jitter_unit * CONFIDENCE_JITTER_SPAN,
        )
    }
}

impl Default for FallbackDraw {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

fn clamp_or_zero(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}

fn soil_type_term(soil_type: &str) -> f64 {
    match soil_type {
        "loamy" => 500.0,
        "clay" => 200.0,
        "sandy" => -200.0,
        _ => 0.0,
    }
}

fn fertilizer_term(fertilizer_use: &str) -> f64 {
    match fertilizer_use {
        "high" => 600.0,
        "moderate" => 300.0,
        "low" => 100.0,
        _ => 0.0,
    }
}

fn irrigation_term(irrigation: &str) -> f64 {
    match irrigation {
        "drip" => 400.0,
        "sprinkler" => 300.0,
        _ => 0.0,
    }
}

/// Deterministic part of the score, before perturbation and floor
pub fn base_score(record: &CropInputRecord) -> f64 {
    let mut score = BASE_YIELD;

    // Weather
    score += (record.rainfall - 100.0) * 8.0;
    score += (25.0 - (record.temperature - 25.0).abs()) * 20.0;
    score += (record.humidity - 50.0) * 5.0;

    // Soil
    score += soil_type_term(&record.soil_type);
    score += (7.0 - (record.soil_ph - 6.5).abs()) * 100.0;

    // Management
    score += fertilizer_term(&record.fertilizer_use);
    score += irrigation_term(&record.irrigation);
    if record.pest_control {
        score += 200.0;
    }
    if record.disease_presence {
        score -= 500.0;
    }
    if record.is_hybrid() {
        score += 400.0;
    }

    score
}

/// Final integer yield for a score: floored at 800, then rounded
pub fn finalize_yield(score: f64) -> i64 {
    // NaN from non-finite inputs collapses to the floor
    let floored = if score.is_nan() {
        MIN_YIELD_KG_PER_HECTARE
    } else {
        score.max(MIN_YIELD_KG_PER_HECTARE)
    };
    floored.round() as i64
}

/// Produce a complete fallback prediction for `record`
pub fn estimate(record: &CropInputRecord, draw: FallbackDraw) -> PredictionResult {
    let draw = FallbackDraw::new(draw.yield_noise, draw.confidence_jitter);
    let score = base_score(record) + draw.yield_noise;

    PredictionResult {
        predicted_yield_kg_per_hectare: finalize_yield(score),
        confidence_score: (BASE_CONFIDENCE + draw.confidence_jitter)
            .min(BASE_CONFIDENCE + CONFIDENCE_JITTER_SPAN),
        model_used: FALLBACK_MODEL_LABEL.to_string(),
        factors_analyzed: FACTORS_ANALYZED,
        recommendations: FALLBACK_RECOMMENDATIONS
            .iter()
            .map(|r| r.to_string())
            .collect(),
        risk_factors: Vec::new(),
    }
}
