//! Location-based form prefill

use serde::{Deserialize, Serialize};

/// Suggested form values for a coordinate.
///
/// Values are strings because they are dropped straight into form inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationPrefill {
    pub latitude: f64,
    pub longitude: f64,
    pub rainfall: String,
    pub temperature: String,
    pub humidity: String,
    pub soil_type: String,
    pub soil_ph: String,
}
