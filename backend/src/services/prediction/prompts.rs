//! Prompt for crop yield prediction

use shared::CropInputRecord;

/// Answer schema and analysis guidance appended after the input data
const PREDICTION_INSTRUCTIONS: &str = r#"**Analysis Guidelines:**
- Consider optimal ranges: Temperature 20-30°C, Rainfall 500-1500mm, Humidity 50-70%, pH 6.0-7.5
- Higher fertilizer use and pest control generally increase yield
- Hybrid varieties typically yield 20-30% more than traditional varieties
- Disease presence reduces yield by 15-25%
- Drip irrigation is most efficient, followed by sprinkler systems
- Soil type affects water retention and nutrient availability

Provide ONLY the JSON response, no additional text or explanation."#;

/// Build the natural-language prompt for one prediction.
///
/// `model_name` is the name the answer should report in `model_used`.
pub fn build_prediction_prompt(record: &CropInputRecord, model_name: &str) -> String {
    let pest_control = if record.pest_control {
        "Applied"
    } else {
        "Not Applied"
    };
    let disease = if record.disease_presence {
        "Detected"
    } else {
        "Not Detected"
    };

    format!(
        r#"You are an expert agricultural AI system specializing in crop yield prediction. Based on the following agricultural data, provide a detailed crop yield prediction.

**Input Data:**
- Rainfall: {rainfall}mm
- Temperature: {temperature}°C
- Humidity: {humidity}%
- Soil Type: {soil_type}
- Soil pH: {soil_ph}
- Fertilizer Use: {fertilizer_use}
- Irrigation: {irrigation}
- Pest Control: {pest_control}
- Crop Variety: {crop_variety}
- Disease Presence: {disease}

**Required Response Format (JSON only):**
{{
  "predicted_yield_kg_per_hectare": [number between 1000-8000],
  "confidence_score": [number between 0.6-0.95],
  "model_used": "{model_name}",
  "factors_analyzed": 10,
  "recommendations": [
    "specific farming recommendation 1",
    "specific farming recommendation 2",
    "specific farming recommendation 3"
  ],
  "risk_factors": [
    "potential risk factor 1",
    "potential risk factor 2"
  ]
}}

{instructions}"#,
        rainfall = record.rainfall,
        temperature = record.temperature,
        humidity = record.humidity,
        soil_type = record.soil_type,
        soil_ph = record.soil_ph,
        fertilizer_use = record.fertilizer_use,
        irrigation = record.irrigation,
        pest_control = pest_control,
        crop_variety = record.crop_variety,
        disease = disease,
        model_name = model_name,
        instructions = PREDICTION_INSTRUCTIONS,
    )
}
