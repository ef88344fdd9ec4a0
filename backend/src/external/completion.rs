//! Text completion provider abstraction
//!
//! The external model is an untrusted oracle: prompt in, free text out.
//! Keeping it behind a trait lets the prediction service be exercised with
//! providers that fail or return crafted text.

use async_trait::async_trait;
use std::time::Duration;

/// Errors raised while obtaining a completion
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API credential was configured
    #[error("Text completion provider is not configured")]
    NotConfigured,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Provider answered with a non-success status
    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider answered with a body we could not decode
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// Provider answered without any text
    #[error("Provider returned no text")]
    EmptyResponse,

    /// The call did not finish within the allotted time
    #[error("Request timed out after {0} ms")]
    Timeout(u128),
}

impl CompletionError {
    /// Classify a reqwest failure.
    ///
    /// The URL is stripped from the error text so that request details never
    /// reach the logs. `timeout` is the client's configured limit, reported
    /// when reqwest gives up on its own.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout(timeout.as_millis())
        } else if err.is_decode() {
            CompletionError::Parse(err.without_url().to_string())
        } else {
            CompletionError::Request(err.without_url().to_string())
        }
    }
}

/// A generative text model
#[async_trait]
pub trait TextCompletionProvider: Send + Sync {
    /// Complete a single prompt, returning the model's raw text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Name reported as `model_used` when the model omits one
    fn model_name(&self) -> &str;

    /// Model version identifier
    fn model_version(&self) -> &str {
        "unknown"
    }

    /// Whether the provider holds the credentials it needs
    fn is_configured(&self) -> bool {
        true
    }
}
