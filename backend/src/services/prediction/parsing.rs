//! Extraction and validation of the model's free-text answer
//!
//! The model is asked for JSON only but is not guaranteed to comply, so the
//! first balanced `{...}` span is cut out of the text before parsing.

use serde::Deserialize;
use serde_json::Value;
use shared::{PredictionResult, FACTORS_ANALYZED, MIN_YIELD_KG_PER_HECTARE};

/// Reasons a model answer cannot be used
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ResponseError {
    #[error("Response contains no JSON object")]
    NoJsonObject,

    #[error("Response JSON is malformed: {0}")]
    InvalidJson(String),

    #[error("Incomplete prediction data: missing {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Find the first balanced JSON object in `text`.
///
/// Braces inside string literals (including escaped quotes) are ignored.
/// When an opening brace never closes, scanning resumes at the next one.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(bytes, start) {
            return Some(&text[start..=end]);
        }
        search_from = start + 1;
    }
    None
}

/// Index of the brace closing the object that opens at `start`
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Loose shape of the model's answer; every field is checked by hand
#[derive(Debug, Deserialize)]
struct RawPrediction {
    predicted_yield_kg_per_hectare: Option<Value>,
    confidence_score: Option<Value>,
    model_used: Option<Value>,
    factors_analyzed: Option<Value>,
    recommendations: Option<Value>,
    risk_factors: Option<Value>,
}

/// Numbers may arrive as JSON numbers or numeric strings
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// A required numeric field: present, non-null, finite and non-zero
fn required_number(value: Option<&Value>, field: &'static str) -> Result<f64, ResponseError> {
    let value = match value {
        None | Some(Value::Null) => return Err(ResponseError::MissingField(field)),
        Some(v) => v,
    };
    let number = as_number(value).ok_or_else(|| ResponseError::InvalidField {
        field,
        reason: format!("expected a number, got {}", value),
    })?;
    if !number.is_finite() || number == 0.0 {
        return Err(ResponseError::InvalidField {
            field,
            reason: format!("unusable value {}", number),
        });
    }
    Ok(number)
}

fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Turn the model's raw text into a complete [`PredictionResult`].
///
/// Only the yield and the confidence are mandatory. Everything else is
/// defaulted so the result is always fully populated: `model_used` falls
/// back to `default_model`, `factors_analyzed` to 10 and the advisory lists
/// to empty. Yields below the 800 kg/ha floor are raised to it.
pub fn parse_prediction(
    text: &str,
    default_model: &str,
) -> Result<PredictionResult, ResponseError> {
    let json = extract_json_object(text).ok_or(ResponseError::NoJsonObject)?;
    let raw: RawPrediction =
        serde_json::from_str(json).map_err(|e| ResponseError::InvalidJson(e.to_string()))?;

    let predicted_yield = required_number(
        raw.predicted_yield_kg_per_hectare.as_ref(),
        "predicted_yield_kg_per_hectare",
    )?;
    let confidence = required_number(raw.confidence_score.as_ref(), "confidence_score")?;

    if predicted_yield < 0.0 {
        return Err(ResponseError::InvalidField {
            field: "predicted_yield_kg_per_hectare",
            reason: format!("negative yield {}", predicted_yield),
        });
    }

    let model_used = match raw.model_used {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        _ => default_model.to_string(),
    };

    let factors_analyzed = raw
        .factors_analyzed
        .as_ref()
        .and_then(as_number)
        .filter(|n| n.is_finite() && *n >= 1.0 && *n <= f64::from(u32::MAX))
        .map(|n| n.round() as u32)
        .unwrap_or(FACTORS_ANALYZED);

    Ok(PredictionResult {
        predicted_yield_kg_per_hectare: predicted_yield.max(MIN_YIELD_KG_PER_HECTARE).round()
            as i64,
        confidence_score: confidence,
        model_used,
        factors_analyzed,
        recommendations: string_list(raw.recommendations),
        risk_factors: string_list(raw.risk_factors),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "Test Model";

    #[test]
    fn test_extract_plain_object() {
        assert_eq!(extract_json_object(r#"{"a":1}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_extract_from_markdown_fence() {
        let text = "Here you go:\n```json\n{\"a\": {\"b\": 2}}\n```\nThanks!";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_extract_first_of_two_objects() {
        let text = r#"{"first":1} and later {"second":2}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"first":1}"#));
    }

    #[test]
    fn test_extract_ignores_braces_in_strings() {
        let text = r#"{"note":"use } and { freely \" }","n":1} tail }"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"note":"use } and { freely \" }","n":1}"#)
        );
    }

    #[test]
    fn test_extract_skips_unclosed_brace() {
        // The leading brace never closes, so scanning resumes at the inner object
        assert_eq!(extract_json_object("{ {\"a\":1}"), Some("{\"a\":1}"));
    }

    #[test]
    fn test_extract_none() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{ never closed"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_parse_complete_answer() {
        let text = r#"{
            "predicted_yield_kg_per_hectare": 4520.6,
            "confidence_score": 0.87,
            "model_used": "Gemini AI Agricultural Model",
            "factors_analyzed": 10,
            "recommendations": ["Irrigate at dawn", "Test soil"],
            "risk_factors": ["Heat stress"]
        }"#;
        let result = parse_prediction(text, MODEL).unwrap();
        assert_eq!(result.predicted_yield_kg_per_hectare, 4521);
        assert_eq!(result.confidence_score, 0.87);
        assert_eq!(result.model_used, "Gemini AI Agricultural Model");
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.risk_factors, vec!["Heat stress".to_string()]);
    }

    #[test]
    fn test_parse_minimal_answer_is_filled_in() {
        let text = r#"Sure! {"predicted_yield_kg_per_hectare": 3000, "confidence_score": 0.7}"#;
        let result = parse_prediction(text, MODEL).unwrap();
        assert_eq!(result.predicted_yield_kg_per_hectare, 3000);
        assert_eq!(result.model_used, MODEL);
        assert_eq!(result.factors_analyzed, 10);
        assert!(result.recommendations.is_empty());
        assert!(result.risk_factors.is_empty());
    }

    #[test]
    fn test_parse_numeric_strings() {
        let text = r#"{"predicted_yield_kg_per_hectare": "3500", "confidence_score": "0.8"}"#;
        let result = parse_prediction(text, MODEL).unwrap();
        assert_eq!(result.predicted_yield_kg_per_hectare, 3500);
        assert_eq!(result.confidence_score, 0.8);
    }

    #[test]
    fn test_parse_missing_confidence() {
        let text = r#"{"predicted_yield_kg_per_hectare": 3000}"#;
        assert_eq!(
            parse_prediction(text, MODEL),
            Err(ResponseError::MissingField("confidence_score"))
        );
    }

    #[test]
    fn test_parse_null_yield() {
        let text = r#"{"predicted_yield_kg_per_hectare": null, "confidence_score": 0.9}"#;
        assert_eq!(
            parse_prediction(text, MODEL),
            Err(ResponseError::MissingField("predicted_yield_kg_per_hectare"))
        );
    }

    #[test]
    fn test_parse_rejects_zero_and_text_values() {
        let zero = r#"{"predicted_yield_kg_per_hectare": 0, "confidence_score": 0.9}"#;
        assert!(matches!(
            parse_prediction(zero, MODEL),
            Err(ResponseError::InvalidField { .. })
        ));
        let words = r#"{"predicted_yield_kg_per_hectare": "high", "confidence_score": 0.9}"#;
        assert!(matches!(
            parse_prediction(words, MODEL),
            Err(ResponseError::InvalidField { .. })
        ));
        let negative = r#"{"predicted_yield_kg_per_hectare": -5, "confidence_score": 0.9}"#;
        assert!(matches!(
            parse_prediction(negative, MODEL),
            Err(ResponseError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_parse_no_object_and_bad_json() {
        assert_eq!(
            parse_prediction("I cannot help with that.", MODEL),
            Err(ResponseError::NoJsonObject)
        );
        assert!(matches!(
            parse_prediction("{yield: lots}", MODEL),
            Err(ResponseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_raises_low_yield_to_floor() {
        let text = r#"{"predicted_yield_kg_per_hectare": 450, "confidence_score": 0.6}"#;
        let result = parse_prediction(text, MODEL).unwrap();
        assert_eq!(result.predicted_yield_kg_per_hectare, 800);
    }

    #[test]
    fn test_parse_drops_non_string_advice() {
        let text = r#"{"predicted_yield_kg_per_hectare": 2000, "confidence_score": 0.9,
            "recommendations": ["ok", 3, null, ""], "risk_factors": "none", "model_used": 42}"#;
        let result = parse_prediction(text, MODEL).unwrap();
        assert_eq!(result.recommendations, vec!["ok".to_string()]);
        assert!(result.risk_factors.is_empty());
        assert_eq!(result.model_used, MODEL);
    }
}
