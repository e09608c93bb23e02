//! External data sources
//!
//! Both sources sit behind traits so that tools and pipelines can be tested
//! without network access.

pub mod serpapi;
pub mod yahoo;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use serpapi::SerpApiClient;
pub use yahoo::YahooMarketData;

/// Fundamentals taken from the live quote
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Regular-market volume
    pub volume: Option<u64>,
    /// Forward price/earnings ratio
    pub pe_ratio: Option<f64>,
    /// Market capitalisation
    pub market_cap: Option<f64>,
}

/// Source of price history and fundamentals
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Daily closing prices over the last trading day, oldest first
    ///
    /// An unknown or delisted symbol may yield an empty list rather than an
    /// error.
    async fn daily_closes(&self, symbol: &str) -> Result<Vec<f64>>;

    /// Volume, forward P/E and market cap
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals>;
}

/// One news article as handed to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Headline
    pub title: String,
    /// Publication date as reported by the source
    pub date: String,
    /// Article URL
    pub link: String,
    /// Publisher name
    pub source: String,
    /// Snippet
    pub summary: String,
}

/// News search backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Search recent news; may return more than `limit` articles
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<NewsArticle>>;
}
