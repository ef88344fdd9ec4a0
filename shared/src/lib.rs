//! Shared types and domain logic for the Crop Yield Prediction Platform
//!
//! This crate contains the data model, the request normalizer and the
//! fallback yield estimator. It performs no I/O so it can be used by the
//! backend and, via WASM, by the browser form.

pub mod estimator;
pub mod models;
pub mod normalize;
pub mod soil;
pub mod types;
pub mod validation;

pub use estimator::*;
pub use models::*;
pub use normalize::*;
pub use types::*;
pub use validation::*;
