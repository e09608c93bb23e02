//! Configuration for the research data sources

use crate::error::{ResearchError, Result};
use crate::tools::news::MAX_ARTICLES;
use agent_utils::{ConfigError, Settings};
use std::fmt;
use std::time::Duration;

/// Default SerpAPI endpoint
pub const SERPAPI_BASE: &str = "https://serpapi.com";

/// Configuration for the stock and news data sources
#[derive(Clone)]
pub struct ResearchConfig {
    /// SerpAPI key
    pub serpapi_api_key: String,

    /// SerpAPI base URL
    pub serpapi_base: String,

    /// News search requests allowed per minute
    pub news_rate_limit: u32,

    /// Articles returned per news query
    pub max_articles: usize,

    /// Request timeout for data-source calls
    pub request_timeout: Duration,
}

impl fmt::Debug for ResearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResearchConfig")
            .field("serpapi_api_key", &"<redacted>")
            .field("serpapi_base", &self.serpapi_base)
            .field("news_rate_limit", &self.news_rate_limit)
            .field("max_articles", &self.max_articles)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ResearchConfig {
    /// Create a config with default endpoints and limits
    pub fn new(serpapi_api_key: impl Into<String>) -> Self {
        Self {
            serpapi_api_key: serpapi_api_key.into(),
            serpapi_base: SERPAPI_BASE.to_string(),
            news_rate_limit: 60,
            max_articles: MAX_ARTICLES,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Build from process settings; fails when the news key is absent
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let key = settings.require_news_api_key()?;
        let config = Self::new(key);
        config.validate()?;
        Ok(config)
    }

    /// Set news search rate limit (requests per minute)
    pub fn with_news_rate_limit(mut self, per_minute: u32) -> Self {
        self.news_rate_limit = per_minute;
        self
    }

    /// Set the per-query article cap
    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    /// Set the SerpAPI base URL
    pub fn with_serpapi_base(mut self, base: impl Into<String>) -> Self {
        self.serpapi_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.serpapi_api_key.trim().is_empty() {
            return Err(ConfigError::Missing(agent_utils::config::NEWS_API_KEY_VAR.to_string()).into());
        }
        if self.news_rate_limit == 0 {
            return Err(invalid("news_rate_limit", "must be greater than 0"));
        }
        if !(1..=MAX_ARTICLES).contains(&self.max_articles) {
            return Err(invalid(
                "max_articles",
                &format!("must be between 1 and {MAX_ARTICLES}"),
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ResearchError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_utils::config::{COMPLETION_API_KEY_VAR, NEWS_API_KEY_VAR};

    #[test]
    fn test_defaults() {
        let config = ResearchConfig::new("serp");
        assert_eq!(config.max_articles, 3);
        assert_eq!(config.news_rate_limit, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_settings_requires_news_key() {
        let settings = Settings::from_lookup(|key| {
            (key == COMPLETION_API_KEY_VAR).then(|| "sk-test".to_string())
        })
        .unwrap();

        let err = ResearchConfig::from_settings(&settings).unwrap_err();
        assert!(matches!(
            err,
            ResearchError::Config(ConfigError::Missing(ref k)) if k == NEWS_API_KEY_VAR
        ));
    }

    #[test]
    fn test_article_cap_bounds() {
        assert!(ResearchConfig::new("serp").with_max_articles(1).validate().is_ok());
        for cap in [0, 4] {
            let config = ResearchConfig::new("serp").with_max_articles(cap);
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("max_articles"));
        }
    }

    #[test]
    fn test_zero_rate_limit_rejected() {
        let config = ResearchConfig::new("serp").with_news_rate_limit(0);
        assert!(matches!(config.validate(), Err(ResearchError::Config(_))));
    }

    #[test]
    fn test_base_url_trimmed() {
        let config = ResearchConfig::new("serp").with_serpapi_base("http://localhost:8080/");
        assert_eq!(config.serpapi_base, "http://localhost:8080");
    }
}
