//! End-to-end research runs against scripted model turns and canned data

use agent_llm::testing::ScriptedProvider;
use agent_llm::{ContentBlock, LLMProvider, MessageContent};
use agent_research::prompts::{DEFAULT_TASK, WRITER};
use agent_research::{
    Fundamentals, MarketDataSource, ModelParams, NewsArticle, NewsSearch, NewsTool,
    ResearchAgents, ResearchPipeline, StockTool,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Arc;

struct CannedMarket {
    closes: Vec<f64>,
}

#[async_trait]
impl MarketDataSource for CannedMarket {
    async fn daily_closes(&self, _symbol: &str) -> agent_research::Result<Vec<f64>> {
        Ok(self.closes.clone())
    }

    async fn fundamentals(&self, _symbol: &str) -> agent_research::Result<Fundamentals> {
        Ok(Fundamentals {
            volume: Some(1_000_000),
            pe_ratio: Some(60.0),
            market_cap: Some(800_000_000_000.0),
        })
    }
}

struct CannedNews {
    articles: Vec<NewsArticle>,
}

#[async_trait]
impl NewsSearch for CannedNews {
    async fn search(&self, _query: &str, _limit: usize) -> agent_research::Result<Vec<NewsArticle>> {
        Ok(self.articles.clone())
    }
}

fn tesla_article() -> NewsArticle {
    NewsArticle {
        title: "Tesla shares rally".to_string(),
        date: "2024-01-01".to_string(),
        link: "https://example.com/tesla".to_string(),
        source: "Reuters".to_string(),
        summary: "Tesla stock rose on delivery numbers.".to_string(),
    }
}

fn pipeline(provider: &Arc<ScriptedProvider>, articles: Vec<NewsArticle>) -> ResearchPipeline {
    let stock_tool = StockTool::new(Arc::new(CannedMarket {
        closes: vec![248.0, 250.0],
    }))
    .with_clock(|| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    });
    let news_tool = NewsTool::new(Arc::new(CannedNews { articles }));

    let params = ModelParams {
        model: "openai/gpt-4o-2024-11-20".to_string(),
        temperature: 0.5,
    };
    let agents = ResearchAgents::assemble(
        || Ok(provider.clone() as Arc<dyn LLMProvider>),
        &params,
        stock_tool,
        news_tool,
    )
    .unwrap();

    ResearchPipeline::from(agents)
}

fn tool_result_payload(provider: &ScriptedProvider, request_index: usize) -> Value {
    let request = &provider.requests()[request_index];
    let last = request.messages.last().unwrap();
    match &last.content {
        Some(MessageContent::Blocks(blocks)) => match &blocks[0] {
            ContentBlock::ToolResult { content, .. } => serde_json::from_str(content).unwrap(),
            other => panic!("Expected tool result, got {other:?}"),
        },
        other => panic!("Expected blocks, got {other:?}"),
    }
}

#[tokio::test]
async fn test_market_research_scenario() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_tool_call("call_stock", "stock_market_data", json!({"symbol": "TSLA"}))
            .with_text("TSLA 收盘价 250 美元")
            .with_tool_call("call_news", "news_fetcher", json!("Tesla"))
            .with_text("特斯拉股价上涨")
            .with_text("📈 特斯拉市场研究报告"),
    );

    let report = pipeline(&provider, vec![tesla_article()])
        .run(DEFAULT_TASK)
        .await
        .unwrap();

    // Writer output is the final report, verbatim
    assert_eq!(report.report(), "📈 特斯拉市场研究报告");
    assert_eq!(
        report.writer.input,
        "Stock Data: TSLA 收盘价 250 美元, News Data: 特斯拉股价上涨"
    );
    assert!(report.degraded_stages().is_empty());

    // The model saw the stock snapshot and the single article
    assert_eq!(
        tool_result_payload(&provider, 1),
        json!({
            "price": 250.0,
            "volume": 1_000_000,
            "pe_ratio": 60.0,
            "market_cap": 800_000_000_000.0,
            "timestamp": "2024-01-01 00:00:00"
        })
    );
    let news = tool_result_payload(&provider, 3);
    assert_eq!(news.as_array().map(Vec::len), Some(1));
    assert_eq!(news[0]["title"], "Tesla shares rally");

    // Both data stages started from the bare task
    let requests = provider.requests();
    assert_eq!(requests.len(), 5);
    assert_eq!(requests[0].messages.len(), 1);
    assert_eq!(requests[0].messages[0].text(), Some(DEFAULT_TASK));
    assert_eq!(requests[2].messages.len(), 1);
    assert_eq!(requests[2].messages[0].text(), Some(DEFAULT_TASK));

    assert_eq!(report.stock.output.tool_calls.len(), 1);
    assert_eq!(report.writer.stage, WRITER);
}

#[tokio::test]
async fn test_no_news_flows_through_as_degraded() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_text("no tool needed")
            .with_tool_call("call_news", "news_fetcher", json!({"query": "TSLA"}))
            .with_text("没有找到相关新闻")
            .with_text("report"),
    );

    let report = pipeline(&provider, Vec::new())
        .run(DEFAULT_TASK)
        .await
        .unwrap();

    assert_eq!(tool_result_payload(&provider, 2), json!({"error": "No news found"}));
    assert_eq!(report.degraded_stages(), vec!["news-analyst"]);
    assert_eq!(report.report(), "report");
}
