//! Market research pipeline
//!
//! Three agents hand text to one another:
//!
//! - the financial analyst calls the `stock_market_data` tool (Yahoo Finance),
//! - the news analyst calls the `news_fetcher` tool (SerpAPI Google News),
//! - the writer turns both outputs into the final report.
//!
//! # Example
//!
//! ```no_run
//! use agent_llm::{ChatClientConfig, ChatClientFactory};
//! use agent_research::{
//!     NewsTool, ResearchAgents, ResearchConfig, ResearchPipeline, SerpApiClient, StockTool,
//!     YahooMarketData, prompts::DEFAULT_TASK,
//! };
//! use agent_utils::Settings;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::from_env()?;
//! let config = ResearchConfig::from_settings(&settings)?;
//! let factory = ChatClientFactory::new(ChatClientConfig::from(&settings.completion));
//!
//! let agents = ResearchAgents::build(
//!     &factory,
//!     StockTool::new(Arc::new(YahooMarketData::new(&config)?)),
//!     NewsTool::new(Arc::new(SerpApiClient::new(&config)?)),
//! )?;
//!
//! let report = ResearchPipeline::from(agents).run(DEFAULT_TASK).await?;
//! println!("{}", report.report());
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod tools;

pub use agents::{ModelParams, ResearchAgents};
pub use api::{
    Fundamentals, MarketDataSource, NewsArticle, NewsSearch, SerpApiClient, YahooMarketData,
};
pub use config::ResearchConfig;
pub use error::{ResearchError, Result};
pub use pipeline::{ResearchPipeline, ResearchReport};
pub use tools::{NewsTool, StockSnapshot, StockTool};
