//! Tool for fetching stock market data

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, error_payload, text_argument};
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::api::MarketDataSource;
use crate::error::{ResearchError, Result};

/// Format of the snapshot timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Market data for one symbol at fetch time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    /// Most recent daily close; `None` when there is no price history
    pub price: Option<f64>,
    /// Regular-market volume
    pub volume: Option<u64>,
    /// Forward P/E
    pub pe_ratio: Option<f64>,
    /// Market capitalisation
    pub market_cap: Option<f64>,
    /// Local fetch time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

/// Tool for fetching price, volume, P/E and market cap
///
/// Never fails past its boundary: bad arguments and data-source errors come
/// back as `{"error": "..."}` so the model can read them.
pub struct StockTool {
    source: Arc<dyn MarketDataSource>,
    clock: Clock,
}

impl StockTool {
    /// Create a new stock data tool
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            clock: Arc::new(|| Local::now().naive_local()),
        }
    }

    /// Replace the clock used for the snapshot timestamp
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Fetch a snapshot for a symbol
    pub async fn snapshot(&self, symbol: &str) -> Result<StockSnapshot> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ResearchError::InvalidSymbol(symbol));
        }

        let closes = self.source.daily_closes(&symbol).await?;
        let fundamentals = self.source.fundamentals(&symbol).await?;

        Ok(StockSnapshot {
            price: closes.last().copied(),
            volume: fundamentals.volume,
            pe_ratio: fundamentals.pe_ratio,
            market_cap: fundamentals.market_cap,
            timestamp: (self.clock)().format(TIMESTAMP_FORMAT).to_string(),
        })
    }
}

#[async_trait]
impl Tool for StockTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = match text_argument(&params, "symbol") {
            Ok(symbol) => symbol,
            Err(e) => return Ok(error_payload(e)),
        };

        match self.snapshot(&symbol).await {
            Ok(snapshot) => serde_json::to_value(snapshot).map_err(|e| {
                agent_core::Error::ProcessingFailed(format!("Failed to serialize snapshot: {e}"))
            }),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Stock data fetch failed");
                Ok(error_payload(e))
            }
        }
    }

    fn name(&self) -> &str {
        "stock_market_data"
    }

    fn description(&self) -> &str {
        "Fetch financial data for a given stock symbol."
    }

    fn input_schema(&self) -> Value {
        schema::single_string("symbol", "Stock ticker symbol (e.g., 'TSLA')")
    }
}
