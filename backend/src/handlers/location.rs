//! HTTP handlers for location-based form prefill

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{GpsCoordinates, LocationPrefill};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppResult;
use crate::AppState;

/// Query parameters for a location prefill
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
}

impl Validate for LocationQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_latitude(self.latitude) {
            errors.add("latitude", e);
        }
        if let Err(e) = validate_longitude(self.longitude) {
            errors.add("longitude", e);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn out_of_range(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_latitude(latitude: f64) -> Result<(), ValidationError> {
    if GpsCoordinates::new(latitude, 0.0).is_valid() {
        Ok(())
    } else {
        Err(out_of_range(
            "latitude_range",
            "Latitude must be between -90 and 90",
        ))
    }
}

fn validate_longitude(longitude: f64) -> Result<(), ValidationError> {
    if GpsCoordinates::new(0.0, longitude).is_valid() {
        Ok(())
    } else {
        Err(out_of_range(
            "longitude_range",
            "Longitude must be between -180 and 180",
        ))
    }
}

/// Suggest form values for the caller's location
pub async fn get_location_prefill(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<LocationPrefill>> {
    query.validate()?;

    let prefill = state
        .location
        .prefill(query.latitude, query.longitude)
        .await?;
    Ok(Json(prefill))
}
