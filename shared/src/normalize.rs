//! Request normalization
//!
//! Turns the string-typed prediction form into a [`CropInputRecord`].
//! Parsing is permissive: unparsable numbers fall back to defaults instead of
//! rejecting the request.

use crate::models::{CropFormData, CropInputRecord};

/// Default for rainfall, temperature and humidity when the text is not a number
pub const DEFAULT_NUMERIC: f64 = 0.0;

/// Default soil pH when the text is not a number
pub const DEFAULT_SOIL_PH: f64 = 6.5;

/// Parse the longest numeric prefix of `text`, the way a browser's
/// `parseFloat` does ("12.5mm" is 12.5, "abc" is nothing).
///
/// Non-finite results are treated as unparsable.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A lone "." only counts when digits surround it on at least one side
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize raw form data into a prediction input record.
///
/// Enum-like fields are passed through verbatim; they are not checked
/// against the known vocabularies here.
pub fn normalize(form: &CropFormData) -> CropInputRecord {
    CropInputRecord {
        rainfall: parse_number(&form.rainfall).unwrap_or(DEFAULT_NUMERIC),
        temperature: parse_number(&form.temperature).unwrap_or(DEFAULT_NUMERIC),
        humidity: parse_number(&form.humidity).unwrap_or(DEFAULT_NUMERIC),
        soil_type: form.soil_type.clone(),
        soil_ph: parse_number(&form.soil_ph).unwrap_or(DEFAULT_SOIL_PH),
        fertilizer_use: form.fertilizer_use.clone(),
        irrigation: form.irrigation.clone(),
        pest_control: form.pest_control,
        disease_presence: form.disease_presence,
        crop_variety: form.crop_variety.clone(),
    }
}

impl From<&CropFormData> for CropInputRecord {
    fn from(form: &CropFormData) -> Self {
        normalize(form)
    }
}
