//! Startup configuration
//!
//! All settings are resolved once, before any pipeline step runs. A missing
//! credential is reported as a [`ConfigError`] instead of surfacing later as
//! an authentication failure deep inside an HTTP call.

use std::fmt;
use thiserror::Error;

/// Environment variable holding the completion backend API key
pub const COMPLETION_API_KEY_VAR: &str = "OPENROUTER_API_KEY";
/// Environment variable holding the completion backend base URL
pub const COMPLETION_API_BASE_VAR: &str = "OPENROUTER_API_BASE";
/// Environment variable overriding the completion model
pub const COMPLETION_MODEL_VAR: &str = "OPENROUTER_MODEL";
/// Environment variable overriding the sampling temperature
pub const COMPLETION_TEMPERATURE_VAR: &str = "OPENROUTER_TEMPERATURE";
/// Environment variable holding the news search API key
pub const NEWS_API_KEY_VAR: &str = "SERPAPI_API_KEY";

/// Default completion endpoint (OpenRouter, OpenAI-compatible)
pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
/// Default completion model
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-2024-11-20";
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required value is absent or empty
    #[error("Missing configuration: {0} is not set")]
    Missing(String),

    /// A value is present but unusable
    #[error("Invalid configuration for {key}: {reason}")]
    Invalid {
        /// Name of the offending setting
        key: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type alias for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings for the chat-completion backend
#[derive(Clone, PartialEq)]
pub struct CompletionSettings {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature in `[0, 1]`
    pub temperature: f32,
}

impl fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Process-wide settings resolved at startup
#[derive(Clone, PartialEq)]
pub struct Settings {
    /// Completion backend settings
    pub completion: CompletionSettings,
    /// News search API key (only the research pipeline needs it)
    pub news_api_key: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("completion", &self.completion)
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first
    /// when present; variables already set in the environment win.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::Invalid {
                    key: ".env".to_string(),
                    reason: e.to_string(),
                });
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = value(COMPLETION_API_KEY_VAR)
            .ok_or_else(|| ConfigError::Missing(COMPLETION_API_KEY_VAR.to_string()))?;

        let api_base =
            value(COMPLETION_API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let model = value(COMPLETION_MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match value(COMPLETION_TEMPERATURE_VAR) {
            Some(raw) => raw.trim().parse::<f32>().map_err(|e| ConfigError::Invalid {
                key: COMPLETION_TEMPERATURE_VAR.to_string(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_TEMPERATURE,
        };
        validate_temperature(temperature)?;

        Ok(Self {
            completion: CompletionSettings {
                api_key,
                api_base,
                model,
                temperature,
            },
            news_api_key: value(NEWS_API_KEY_VAR),
        })
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.completion.model = model.into();
        self
    }

    /// Override the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Result<Self> {
        validate_temperature(temperature)?;
        self.completion.temperature = temperature;
        Ok(self)
    }

    /// The news search API key, or a configuration error when absent
    pub fn require_news_api_key(&self) -> Result<&str> {
        self.news_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::Missing(NEWS_API_KEY_VAR.to_string()))
    }
}

/// Check that a temperature lies in `[0, 1]`
pub fn validate_temperature(temperature: f32) -> Result<()> {
    if (0.0..=1.0).contains(&temperature) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: "temperature".to_string(),
            reason: format!("{temperature} is outside [0, 1]"),
        })
    }
}
