//! Tool for fetching recent news

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, error_payload, text_argument};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{NewsArticle, NewsSearch};
use crate::config::ResearchConfig;
use crate::error::Result;

/// Payload returned when a search comes back empty
pub const NO_NEWS_FOUND: &str = "No news found";

/// Most articles handed to the model per query
pub const MAX_ARTICLES: usize = 3;

/// Tool for fetching recent news articles
///
/// Returns at most [`MAX_ARTICLES`] articles, `{"error": "No news found"}`
/// for an empty result, or `{"error": "..."}` when the search fails.
pub struct NewsTool {
    search: Arc<dyn NewsSearch>,
    max_articles: usize,
}

impl NewsTool {
    /// Create a new news tool
    pub fn new(search: Arc<dyn NewsSearch>) -> Self {
        Self {
            search,
            max_articles: MAX_ARTICLES,
        }
    }

    /// News tool capped at the configured article count
    pub fn from_config(search: Arc<dyn NewsSearch>, config: &ResearchConfig) -> Self {
        Self::new(search).with_max_articles(config.max_articles)
    }

    /// Lower the article cap
    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles.clamp(1, MAX_ARTICLES);
        self
    }

    /// Search and cap the result list
    pub async fn articles(&self, query: &str) -> Result<Vec<NewsArticle>> {
        let mut articles = self.search.search(query, self.max_articles).await?;
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}

#[async_trait]
impl Tool for NewsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let query = match text_argument(&params, "query") {
            Ok(query) => query,
            Err(e) => return Ok(error_payload(e)),
        };

        match self.articles(&query).await {
            Ok(articles) if articles.is_empty() => {
                warn!(query = %query, "No news found");
                Ok(error_payload(NO_NEWS_FOUND))
            }
            Ok(articles) => {
                info!(query = %query, count = articles.len(), "News articles found");
                serde_json::to_value(articles).map_err(|e| {
                    agent_core::Error::ProcessingFailed(format!("Failed to serialize articles: {e}"))
                })
            }
            Err(e) => {
                warn!(query = %query, error = %e, "News fetch failed");
                Ok(error_payload(e))
            }
        }
    }

    fn name(&self) -> &str {
        "news_fetcher"
    }

    fn description(&self) -> &str {
        "Fetch recent news articles for a given query."
    }

    fn input_schema(&self) -> Value {
        schema::single_string("query", "News search query, e.g. a company name or ticker")
    }
}
