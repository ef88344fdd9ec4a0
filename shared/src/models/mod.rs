//! Domain models for the Crop Yield Prediction Platform

mod crop;
mod location;
mod prediction;

pub use crop::*;
pub use location::*;
pub use prediction::*;
