//! External service integrations

pub mod completion;
pub mod gemini;
pub mod weather;

pub use completion::{CompletionError, TextCompletionProvider};
pub use gemini::GeminiClient;
pub use weather::WeatherClient;
