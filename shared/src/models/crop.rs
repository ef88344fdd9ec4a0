//! Crop input models

use serde::{Deserialize, Serialize};

/// Raw prediction form exactly as the browser collects it.
///
/// Numeric fields stay as text here; [`crate::normalize`] turns them into a
/// [`CropInputRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CropFormData {
    pub rainfall: String,
    pub temperature: String,
    pub humidity: String,
    pub soil_type: String,
    pub soil_ph: String,
    pub fertilizer_use: String,
    pub irrigation: String,
    pub pest_control: bool,
    pub crop_variety: String,
    pub disease_presence: bool,
}

/// Normalized agricultural parameters for one prediction request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropInputRecord {
    /// Rainfall in millimetres
    pub rainfall: f64,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    pub soil_type: String,
    pub soil_ph: f64,
    pub fertilizer_use: String,
    pub irrigation: String,
    #[serde(default)]
    pub pest_control: bool,
    #[serde(default)]
    pub disease_presence: bool,
    pub crop_variety: String,
}

impl CropInputRecord {
    /// Whether the variety identifier marks a hybrid (case-sensitive)
    pub fn is_hybrid(&self) -> bool {
        self.crop_variety.contains("hybrid")
    }
}
