//! Error types for the research pipeline

use agent_utils::ConfigError;
use thiserror::Error;

/// Research specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Yahoo Finance request or decoding failed
    #[error("Yahoo Finance error: {0}")]
    YahooFinance(String),

    /// News search request failed
    #[error("News search error: {0}")]
    NewsSearch(String),

    /// A data service answered with a non-success status
    #[error("{service} returned HTTP {status}: {body}")]
    HttpStatus {
        /// Which service
        service: String,
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Convert ResearchError to agent_core::Error
impl From<ResearchError> for agent_core::Error {
    fn from(err: ResearchError) -> Self {
        match err {
            ResearchError::Config(e) => Self::Configuration(e),
            ResearchError::Network(e) => Self::Network(e.to_string()),
            ResearchError::NewsSearch(_) => Self::ExternalService {
                service: "news search".to_string(),
                message: err.to_string(),
            },
            ResearchError::HttpStatus { ref service, .. } => Self::ExternalService {
                service: service.clone(),
                message: err.to_string(),
            },
            other => Self::ExternalService {
                service: "market data".to_string(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResearchError::InvalidSymbol("".to_string());
        assert_eq!(err.to_string(), "Invalid symbol: ");

        let err = ResearchError::HttpStatus {
            service: "SerpAPI".to_string(),
            status: 401,
            body: "Invalid API key".to_string(),
        };
        assert_eq!(err.to_string(), "SerpAPI returned HTTP 401: Invalid API key");
    }

    #[test]
    fn test_error_conversion() {
        let err: agent_core::Error =
            ResearchError::Config(ConfigError::Missing("SERPAPI_API_KEY".to_string())).into();
        assert!(err.is_configuration());

        let err: agent_core::Error = ResearchError::YahooFinance("no data".to_string()).into();
        match err {
            agent_core::Error::ExternalService { service, message } => {
                assert_eq!(service, "market data");
                assert!(message.contains("no data"));
            }
            other => panic!("Expected ExternalService, got {other:?}"),
        }
    }
}
