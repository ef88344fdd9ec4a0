//! Crop yield prediction service
//!
//! Asks the external model first and falls back to the local estimator on
//! any failure. [`PredictionService::predict`] always resolves to a complete
//! result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use shared::{estimate, unknown_fields, CropInputRecord, ModelInfo, PredictionResult};
use shared::{FACTORS_ANALYZED, FALLBACK_MODEL_LABEL};

use crate::external::{CompletionError, TextCompletionProvider};

pub mod draws;
pub mod parsing;
pub mod prompts;

pub use draws::{DrawSource, FixedDraws, SeededDraws, ThreadRngDraws};
pub use parsing::{extract_json_object, parse_prediction, ResponseError};
pub use prompts::build_prediction_prompt;

/// Default upper bound on one external model call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why the external path was abandoned
#[derive(Debug, thiserror::Error)]
pub enum PredictionFailure {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Service producing crop yield predictions
pub struct PredictionService {
    provider: Arc<dyn TextCompletionProvider>,
    draws: Arc<dyn DrawSource>,
    timeout: Duration,
}

impl PredictionService {
    /// Creates a new prediction service
    pub fn new(
        provider: Arc<dyn TextCompletionProvider>,
        draws: Arc<dyn DrawSource>,
        timeout: Duration,
    ) -> Self {
        tracing::info!(
            model = %provider.model_name(),
            configured = provider.is_configured(),
            timeout_ms = timeout.as_millis(),
            "Prediction service initialized"
        );

        Self {
            provider,
            draws,
            timeout,
        }
    }

    /// Creates a service with unseeded fallback draws
    pub fn with_provider(provider: Arc<dyn TextCompletionProvider>) -> Self {
        Self::new(provider, Arc::new(ThreadRngDraws), DEFAULT_TIMEOUT)
    }

    /// Predict the yield for `record`.
    ///
    /// Makes a single attempt at the external model. Transport errors,
    /// timeouts and unusable answers are logged and replaced by the fallback
    /// estimate.
    pub async fn predict(&self, record: &CropInputRecord) -> PredictionResult {
        let unknown = unknown_fields(record);
        if !unknown.is_empty() {
            tracing::debug!(
                fields = ?unknown,
                "Input carries out-of-vocabulary values; they earn no fallback bonus"
            );
        }

        match self.predict_external(record).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    model = %self.provider.model_name(),
                    error = %e,
                    "External prediction failed, using fallback estimator"
                );
                self.fallback(record)
            }
        }
    }

    /// The fallback estimate alone, without touching the external model
    pub fn fallback(&self, record: &CropInputRecord) -> PredictionResult {
        estimate(record, self.draws.draw())
    }

    /// The external path: prompt, call, extract, validate
    pub async fn predict_external(
        &self,
        record: &CropInputRecord,
    ) -> Result<PredictionResult, PredictionFailure> {
        let start_time = Instant::now();
        let prompt = build_prediction_prompt(record, self.provider.model_name());

        tracing::debug!(
            model = %self.provider.model_name(),
            prompt_length = prompt.len(),
            "Requesting external crop yield prediction"
        );

        let text = match tokio::time::timeout(self.timeout, self.provider.complete(&prompt)).await
        {
            Ok(result) => result?,
            Err(_) => return Err(CompletionError::Timeout(self.timeout.as_millis()).into()),
        };

        let result = parse_prediction(&text, self.provider.model_name())?;

        tracing::info!(
            model = %result.model_used,
            elapsed_ms = start_time.elapsed().as_millis(),
            predicted_yield = result.predicted_yield_kg_per_hectare,
            "External crop yield prediction completed"
        );

        Ok(result)
    }

    /// Whether the external model has credentials
    pub fn is_external_configured(&self) -> bool {
        self.provider.is_configured()
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Describe the model behind the prediction endpoint
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_type: self.provider.model_name().to_string(),
            version: self.provider.model_version().to_string(),
            capabilities: "Crop yield prediction with contextual recommendations".to_string(),
            feature_count: FACTORS_ANALYZED,
            fallback_model: FALLBACK_MODEL_LABEL.to_string(),
        }
    }
}
