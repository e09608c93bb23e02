//! Completion errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LLMError>;

/// Why a completion call failed
///
/// None of these are retried; the caller sees the first failure.
#[derive(Error, Debug)]
pub enum LLMError {
    /// HTTP 401/403, or a key rejected before sending
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// HTTP 429
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// HTTP 400
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP 404 for the requested model
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// Any other non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Connect, timeout, TLS or body-read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with something we cannot use
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<LLMError> for agent_core::Error {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::Authentication(msg) => Self::Authentication(msg),
            LLMError::RateLimited(msg) => Self::RateLimited(msg),
            LLMError::Network(e) => Self::Network(e.to_string()),
            LLMError::Configuration(reason) => Self::Configuration(agent_utils::ConfigError::Invalid {
                key: "chat client".to_string(),
                reason,
            }),
            other => Self::ExternalService {
                service: "completion".to_string(),
                message: other.to_string(),
            },
        }
    }
}
