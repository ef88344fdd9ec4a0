//! Configuration management for the Crop Yield Prediction Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CYP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable the browser-era deployment used for the model key
const LEGACY_API_KEY_VAR: &str = "GOOGLE_GEMINI_API_KEY";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Generative model configuration
    pub gemini: GeminiConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key; when absent every prediction comes from the fallback estimator
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier, e.g. gemini-2.0-flash-exp
    pub model: String,

    /// Generative Language API base URL
    pub api_endpoint: String,

    /// Upper bound on a single model call, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CYP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("gemini.model", "gemini-2.0-flash-exp")?
            .set_default(
                "gemini.api_endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.timeout_secs", 30)?
            .set_default("weather.api_endpoint", "https://api.open-meteo.com/v1")?
            .set_default("weather.timeout_secs", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CYP_ prefix)
            .add_source(
                Environment::with_prefix("CYP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        config.gemini.apply_legacy_key(std::env::var(LEGACY_API_KEY_VAR).ok());
        Ok(config)
    }
}

impl GeminiConfig {
    /// Use `legacy_key` when no prefixed key was configured. Blank keys count
    /// as missing.
    pub fn apply_legacy_key(&mut self, legacy_key: Option<String>) {
        let configured = self
            .api_key
            .take()
            .filter(|key| !key.trim().is_empty());
        self.api_key = configured.or_else(|| legacy_key.filter(|key| !key.trim().is_empty()));
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash-exp".to_string(),
            api_endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.open-meteo.com/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            gemini: GeminiConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_key_used_when_missing() {
        let mut gemini = GeminiConfig::default();
        gemini.apply_legacy_key(Some("legacy".to_string()));
        assert_eq!(gemini.api_key.as_deref(), Some("legacy"));
        assert!(gemini.is_configured());
    }

    #[test]
    fn test_prefixed_key_wins() {
        let mut gemini = GeminiConfig {
            api_key: Some("prefixed".to_string()),
            ..GeminiConfig::default()
        };
        gemini.apply_legacy_key(Some("legacy".to_string()));
        assert_eq!(gemini.api_key.as_deref(), Some("prefixed"));
    }

    #[test]
    fn test_blank_keys_are_missing() {
        let mut gemini = GeminiConfig {
            api_key: Some("  ".to_string()),
            ..GeminiConfig::default()
        };
        gemini.apply_legacy_key(Some(String::new()));
        assert!(!gemini.is_configured());
    }
}
