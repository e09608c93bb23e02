//! SerpAPI Google News client

use super::{NewsArticle, NewsSearch};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const DEFAULT_RATE_LIMIT: NonZeroU32 = NonZeroU32::MIN.saturating_add(59);

/// SerpAPI client for the `google_news` engine
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

impl SerpApiClient {
    /// Create a new client with rate limiting
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        let per_minute = NonZeroU32::new(config.news_rate_limit).unwrap_or(DEFAULT_RATE_LIMIT);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            api_key: config.serpapi_api_key.clone(),
            base_url: config.serpapi_base.clone(),
            rate_limiter,
        })
    }
}

#[async_trait]
impl NewsSearch for SerpApiClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<NewsArticle>> {
        self.rate_limiter.until_ready().await;

        let num = limit.to_string();
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("engine", "google_news"),
                ("q", query),
                ("gl", "us"),
                ("hl", "en"),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ResearchError::NewsSearch(format!("SerpAPI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResearchError::HttpStatus {
                service: "SerpAPI".to_string(),
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ResearchError::NewsSearch(format!("Failed to parse SerpAPI response: {e}")))?;

        let articles = parse_news_results(&body);
        debug!(count = articles.len(), "News articles found");
        Ok(articles)
    }
}

/// Map `news_results` entries, filling in placeholders for missing fields
///
/// A body without `news_results` (SerpAPI's "no results" answer) is an empty
/// list.
pub fn parse_news_results(body: &Value) -> Vec<NewsArticle> {
    let Some(results) = body.get("news_results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .map(|article| NewsArticle {
            title: text_field(article, "title", "No Title"),
            date: text_field(article, "date", "Unknown Date"),
            link: text_field(article, "link", "No Link"),
            source: source_name(article),
            summary: text_field(article, "snippet", "No Summary Available"),
        })
        .collect()
}

fn text_field(article: &Value, key: &str, default: &str) -> String {
    article
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn source_name(article: &Value) -> String {
    match article.get("source") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Object(source)) => source
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown Source")
            .to_string(),
        _ => "Unknown Source".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = SerpApiClient::new(&ResearchConfig::new("test_key")).unwrap();
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.base_url, "https://serpapi.com");
    }

    #[test]
    fn test_parse_full_article() {
        let body = json!({
            "news_results": [{
                "title": "Tesla deliveries beat estimates",
                "date": "01/02/2024, 08:00 AM, +0000 UTC",
                "link": "https://example.com/tesla",
                "source": {"name": "Reuters", "icon": "https://example.com/icon.png"},
                "snippet": "Tesla delivered more cars than expected."
            }]
        });

        let articles = parse_news_results(&body);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "Reuters");
        assert_eq!(articles[0].summary, "Tesla delivered more cars than expected.");
    }

    #[test]
    fn test_parse_defaults() {
        let body = json!({"news_results": [{}]});
        let articles = parse_news_results(&body);

        assert_eq!(
            articles[0],
            NewsArticle {
                title: "No Title".to_string(),
                date: "Unknown Date".to_string(),
                link: "No Link".to_string(),
                source: "Unknown Source".to_string(),
                summary: "No Summary Available".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_no_results() {
        let body = json!({"error": "Google hasn't returned any results for this query."});
        assert!(parse_news_results(&body).is_empty());
    }

    #[test]
    fn test_default_rate_limit() {
        assert_eq!(DEFAULT_RATE_LIMIT.get(), 60);
    }
}
