//! Location-based form prefill
//!
//! Combines current weather with latitude-band soil guesses. This only
//! suggests form values; it plays no part in the prediction itself.

use shared::soil::{estimate_soil_ph, estimate_soil_type};
use shared::LocationPrefill;

use crate::error::AppResult;
use crate::external::weather::{CurrentConditions, WeatherClient};

/// Rainfall suggested when the weather service reports none
pub const DEFAULT_RAINFALL_MM: f64 = 100.0;
pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 60.0;

/// Service for building location prefills
#[derive(Clone)]
pub struct LocationService {
    weather_client: WeatherClient,
}

impl LocationService {
    pub fn new(weather_client: WeatherClient) -> Self {
        Self { weather_client }
    }

    /// Fetch conditions for a coordinate and build the prefill
    pub async fn prefill(&self, latitude: f64, longitude: f64) -> AppResult<LocationPrefill> {
        let conditions = self
            .weather_client
            .get_current_conditions(latitude, longitude)
            .await?;

        tracing::debug!(
            latitude,
            longitude,
            weather_code = ?conditions.weather_code,
            "Fetched current conditions for prefill"
        );

        Ok(build_prefill(latitude, longitude, &conditions))
    }
}

/// Zero and missing readings both count as "no reading"
fn reading(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Build prefill values from fetched conditions
pub fn build_prefill(
    latitude: f64,
    longitude: f64,
    conditions: &CurrentConditions,
) -> LocationPrefill {
    let rainfall = reading(conditions.precipitation_sum_mm)
        .or_else(|| reading(conditions.precipitation_mm))
        .unwrap_or(DEFAULT_RAINFALL_MM);
    let temperature = reading(conditions.temperature_celsius).unwrap_or(DEFAULT_TEMPERATURE_C);
    let humidity = reading(conditions.humidity_percent).unwrap_or(DEFAULT_HUMIDITY_PERCENT);

    let soil_type = estimate_soil_type(latitude, longitude);
    let soil_ph = estimate_soil_ph(soil_type, latitude);

    LocationPrefill {
        latitude,
        longitude,
        rainfall: rainfall.to_string(),
        temperature: temperature.to_string(),
        humidity: humidity.to_string(),
        soil_type: soil_type.to_string(),
        soil_ph,
    }
}
