//! HTTP handlers for the Crop Yield Prediction Platform

pub mod health;
pub mod location;
pub mod prediction;

pub use health::*;
pub use location::*;
pub use prediction::*;
