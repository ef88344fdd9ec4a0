//! Business logic services for the Crop Yield Prediction Platform

pub mod location;
pub mod prediction;

pub use location::LocationService;
pub use prediction::PredictionService;
