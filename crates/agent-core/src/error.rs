//! Error types for agent-core

use agent_utils::ConfigError;
use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration, detected before any work starts
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// The completion backend rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Transport failure while talking to an external service
    #[error("Network error: {0}")]
    Network(String),

    /// The backend signalled throttling
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Any other failure reported by an external service
    #[error("{service} error: {message}")]
    ExternalService {
        /// Service that failed (e.g. "openai")
        service: String,
        /// Failure description
        message: String,
    },
}

impl Error {
    /// Whether this error was raised before any external call was made
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
