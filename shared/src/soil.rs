//! Latitude-band soil heuristics used to prefill the prediction form
//!
//! These are cosmetic guesses, not measurements.

/// Guess a soil type from coordinates.
///
/// Tropical, temperate and other latitude bands each have three candidates;
/// the candidate is picked by `(lat + lon) mod 3`.
pub fn estimate_soil_type(latitude: f64, longitude: f64) -> &'static str {
    let options: [&'static str; 3] = if latitude < 23.5 && latitude > -23.5 {
        ["clay", "loamy", "laterite"]
    } else if latitude < 50.0 && latitude > 30.0 {
        ["loamy", "silty", "clay"]
    } else {
        ["sandy", "peaty", "silty"]
    };

    let sum = latitude + longitude;
    let index = if sum.is_finite() {
        (sum.rem_euclid(3.0).floor() as usize).min(2)
    } else {
        0
    };
    options[index]
}

/// Typical pH for a soil type, before the latitude variation
pub fn base_soil_ph(soil_type: &str) -> f64 {
    match soil_type {
        "loamy" => 6.5,
        "clay" => 6.0,
        "sandy" => 6.8,
        "silty" => 6.3,
        "laterite" => 5.5,
        "peaty" => 5.0,
        _ => 6.5,
    }
}

/// Estimate soil pH, formatted with one decimal like the form expects
pub fn estimate_soil_ph(soil_type: &str, latitude: f64) -> String {
    let variation = (latitude.abs() % 1.0) * 0.5;
    format!("{:.1}", base_soil_ph(soil_type) + variation)
}
