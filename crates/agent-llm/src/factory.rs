//! Chat client construction
//!
//! [`ChatClientFactory`] turns resolved settings into [`LLMProvider`]s. Every
//! agent gets its own client from [`ChatClientFactory::build`]; they share the
//! settings, not the connection.

use crate::{LLMError, LLMProvider, Result};
use agent_utils::{CompletionSettings, DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use std::fmt;
use std::sync::Arc;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Parameters for building a chat client
#[derive(Clone, PartialEq)]
pub struct ChatClientConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature in `[0, 1]`
    pub temperature: f32,
    /// Bearer token for the backend
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ChatClientConfig {
    /// Config with default model, temperature and endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Reject configurations that could never produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(LLMError::Configuration(
                "API key is empty".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(LLMError::Configuration("model is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(LLMError::Configuration(format!(
                "temperature {} is outside [0, 1]",
                self.temperature
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ChatClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClientConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl From<&CompletionSettings> for ChatClientConfig {
    fn from(settings: &CompletionSettings) -> Self {
        Self::new(settings.api_key.clone())
            .with_model(settings.model.clone())
            .with_temperature(settings.temperature)
            .with_api_base(settings.api_base.clone())
    }
}

/// Builds the shared chat client
///
/// # Example
///
/// ```no_run
/// use agent_llm::{ChatClientConfig, ChatClientFactory};
///
/// let factory = ChatClientFactory::new(ChatClientConfig::new("sk-or-..."));
/// let client = factory.build().unwrap();
/// assert_eq!(client.name(), "openai");
/// ```
#[derive(Debug, Clone)]
pub struct ChatClientFactory {
    config: ChatClientConfig,
}

impl ChatClientFactory {
    /// Create a factory for the given config
    pub fn new(config: ChatClientConfig) -> Self {
        Self { config }
    }

    /// The config clients are built from
    pub fn config(&self) -> &ChatClientConfig {
        &self.config
    }

    /// Model identifier agents should put on their requests
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Temperature agents should put on their requests
    pub fn temperature(&self) -> f32 {
        self.config.temperature
    }

    /// Validate the config and build an OpenAI-compatible client
    #[cfg(feature = "openai")]
    pub fn build(&self) -> Result<Arc<dyn LLMProvider>> {
        use crate::providers::{OpenAIConfig, OpenAIProvider};

        self.config.validate()?;

        let provider_config = OpenAIConfig::new(self.config.api_key.clone())
            .with_api_base(self.config.api_base.clone())
            .with_timeout(self.config.timeout_secs);
        let provider = OpenAIProvider::with_config(provider_config)?;

        tracing::debug!(
            model = %self.config.model,
            api_base = %self.config.api_base,
            "Built chat client"
        );

        Ok(Arc::new(provider))
    }
}
