//! WebAssembly module for the Crop Yield Prediction Platform
//!
//! Provides client-side computation for:
//! - Prediction form normalization
//! - Offline fallback yield estimates
//! - Soil guesses for location prefill

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{estimate, normalize, FallbackDraw};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("crop yield wasm module loaded"));
}

fn normalize_json(form_json: &str) -> Result<String, String> {
    let form: CropFormData =
        serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))?;
    serde_json::to_string(&normalize(&form)).map_err(|e| e.to_string())
}

fn estimate_json(record_json: &str, noise_unit: f64, jitter_unit: f64) -> Result<String, String> {
    let record: CropInputRecord =
        serde_json::from_str(record_json).map_err(|e| format!("Invalid record JSON: {}", e))?;
    let result = estimate(&record, FallbackDraw::from_unit(noise_unit, jitter_unit));
    serde_json::to_string(&result).map_err(|e| e.to_string())
}

/// Normalize the raw prediction form into the API payload
#[wasm_bindgen]
pub fn transform_form_data(form_json: &str) -> Result<String, JsValue> {
    normalize_json(form_json).map_err(|e| JsValue::from_str(&e))
}

/// Offline fallback estimate for a normalized record.
///
/// `noise_unit` and `jitter_unit` are uniform samples from `[0, 1)`, e.g.
/// `Math.random()`.
#[wasm_bindgen]
pub fn estimate_fallback_yield(
    record_json: &str,
    noise_unit: f64,
    jitter_unit: f64,
) -> Result<String, JsValue> {
    estimate_json(record_json, noise_unit, jitter_unit).map_err(|e| JsValue::from_str(&e))
}

/// Offline fallback estimate drawing its perturbation from `Math.random()`
#[wasm_bindgen]
pub fn estimate_fallback_yield_random(record_json: &str) -> Result<String, JsValue> {
    estimate_fallback_yield(record_json, js_sys::Math::random(), js_sys::Math::random())
}

/// Parse a numeric form field the same way the server does
#[wasm_bindgen]
pub fn parse_form_number(text: &str) -> Option<f64> {
    shared::parse_number(text)
}

/// Guess a soil type for coordinates
#[wasm_bindgen]
pub fn guess_soil_type(latitude: f64, longitude: f64) -> String {
    shared::soil::estimate_soil_type(latitude, longitude).to_string()
}

/// Guess soil pH (one decimal) for a soil type and latitude
#[wasm_bindgen]
pub fn guess_soil_ph(soil_type: &str, latitude: f64) -> String {
    shared::soil::estimate_soil_ph(soil_type, latitude)
}

/// Whether a soil type is part of the form vocabulary
#[wasm_bindgen]
pub fn is_known_soil(soil_type: &str) -> bool {
    is_known_soil_type(soil_type)
}
