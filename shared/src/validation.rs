//! Vocabulary checks for the enum-like crop fields
//!
//! These are advisory only. Out-of-vocabulary values are accepted by the
//! normalizer and simply earn no bonus in the fallback score; the helpers
//! here let callers report them.

use crate::models::CropInputRecord;

/// Soil types offered by the prediction form
pub const KNOWN_SOIL_TYPES: [&str; 7] = [
    "clay", "loamy", "sandy", "silty", "peaty", "chalky", "laterite",
];

/// Fertilizer usage levels
pub const KNOWN_FERTILIZER_USE: [&str; 4] = ["none", "low", "moderate", "high"];

/// Irrigation methods
pub const KNOWN_IRRIGATION: [&str; 5] = ["none", "flood", "drip", "sprinkler", "furrow"];

pub fn is_known_soil_type(value: &str) -> bool {
    KNOWN_SOIL_TYPES.contains(&value)
}

pub fn is_known_fertilizer_use(value: &str) -> bool {
    KNOWN_FERTILIZER_USE.contains(&value)
}

pub fn is_known_irrigation(value: &str) -> bool {
    KNOWN_IRRIGATION.contains(&value)
}

/// Names of the enum-like fields holding out-of-vocabulary values
pub fn unknown_fields(record: &CropInputRecord) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if !is_known_soil_type(&record.soil_type) {
        fields.push("soil_type");
    }
    if !is_known_fertilizer_use(&record.fertilizer_use) {
        fields.push("fertilizer_use");
    }
    if !is_known_irrigation(&record.irrigation) {
        fields.push("irrigation");
    }
    fields
}
