//! Weather API client for fetching current conditions
//!
//! Integrates with the Open-Meteo forecast API, which needs no API key.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

/// Current weather conditions at a coordinate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub precipitation_mm: Option<f64>,
    /// Today's total precipitation
    pub precipitation_sum_mm: Option<f64>,
    pub temperature_max_celsius: Option<f64>,
    pub temperature_min_celsius: Option<f64>,
    /// WMO weather interpretation code
    pub weather_code: Option<i32>,
}

/// Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: Option<OpenMeteoCurrent>,
    daily: Option<OpenMeteoDaily>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    time: Option<String>,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<CurrentConditions> {
        let url = format!("{}/forecast", self.base_url);
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,precipitation,weather_code",
                ),
                (
                    "daily",
                    "precipitation_sum,temperature_2m_max,temperature_2m_min",
                ),
                ("timezone", "auto"),
                ("forecast_days", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::WeatherServiceUnavailable(format!("Weather API request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherServiceUnavailable(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OpenMeteoResponse = response.json().await.map_err(|e| {
            AppError::WeatherServiceUnavailable(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_response(data))
    }
}

/// Convert an Open-Meteo response to our format
fn convert_response(data: OpenMeteoResponse) -> CurrentConditions {
    let current = data.current;
    let daily = data.daily;

    CurrentConditions {
        observed_at: current
            .as_ref()
            .and_then(|c| c.time.as_deref())
            .and_then(parse_local_time),
        temperature_celsius: current.as_ref().and_then(|c| c.temperature_2m),
        humidity_percent: current.as_ref().and_then(|c| c.relative_humidity_2m),
        precipitation_mm: current.as_ref().and_then(|c| c.precipitation),
        weather_code: current.as_ref().and_then(|c| c.weather_code),
        precipitation_sum_mm: daily.as_ref().and_then(|d| first_value(&d.precipitation_sum)),
        temperature_max_celsius: daily.as_ref().and_then(|d| first_value(&d.temperature_2m_max)),
        temperature_min_celsius: daily.as_ref().and_then(|d| first_value(&d.temperature_2m_min)),
    }
}

fn first_value(values: &[Option<f64>]) -> Option<f64> {
    values.first().copied().flatten()
}

/// Open-Meteo reports ISO8601 local times without an offset ("2024-05-01T12:00")
fn parse_local_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|t| t.and_utc())
}
