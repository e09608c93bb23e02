//! Yahoo Finance market data

use super::{Fundamentals, MarketDataSource};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use yahoo_finance_api::{self as yahoo, YQuoteSummary, YahooConnector};

/// Yahoo Finance client
///
/// Prices come from the chart endpoint, fundamentals from the quote summary.
/// The connector caches the session cookie and crumb the summary endpoint
/// needs, so it is kept behind a lock and reused across calls.
pub struct YahooMarketData {
    connector: Mutex<YahooConnector>,
}

impl YahooMarketData {
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        let connector = YahooConnector::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(yahoo_error)?;

        Ok(Self {
            connector: Mutex::new(connector),
        })
    }
}

#[async_trait]
impl MarketDataSource for YahooMarketData {
    #[instrument(skip(self))]
    async fn daily_closes(&self, symbol: &str) -> Result<Vec<f64>> {
        let response = self
            .connector
            .lock()
            .await
            .get_quote_range(symbol, "1d", "1d")
            .await
            .map_err(yahoo_error)?;

        // A response without bars is an empty history, not a failure
        match response.quotes() {
            Ok(quotes) => Ok(quotes.iter().map(|q| q.close).collect()),
            Err(e) => {
                debug!(error = %e, "No price bars in response");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self))]
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        let summary = self
            .connector
            .lock()
            .await
            .get_ticker_info(symbol)
            .await
            .map_err(yahoo_error)?;

        summary_fundamentals(symbol, summary)
    }
}

/// Volume, forward P/E and market cap out of a quote summary
///
/// `summaryDetail` wins; forward P/E falls back to `defaultKeyStatistics`.
fn summary_fundamentals(symbol: &str, summary: YQuoteSummary) -> Result<Fundamentals> {
    let Some(quote_summary) = summary.quote_summary else {
        return Err(ResearchError::InvalidSymbol(symbol.to_string()));
    };

    let Some(data) = quote_summary.result.and_then(|r| r.into_iter().next()) else {
        return Err(match quote_summary.error.and_then(|e| e.description) {
            Some(description) => ResearchError::YahooFinance(description),
            None => ResearchError::InvalidSymbol(symbol.to_string()),
        });
    };

    let detail = data.summary_detail;
    let key_forward_pe = data.default_key_statistics.and_then(|s| s.forward_pe);

    Ok(Fundamentals {
        volume: detail
            .as_ref()
            .and_then(|d| d.regular_market_volume.or(d.volume)),
        pe_ratio: detail
            .as_ref()
            .and_then(|d| d.forward_pe)
            .or(key_forward_pe),
        market_cap: detail.and_then(|d| d.market_cap).map(|cap| cap as f64),
    })
}

fn yahoo_error(err: yahoo::YahooError) -> ResearchError {
    ResearchError::YahooFinance(err.to_string())
}
