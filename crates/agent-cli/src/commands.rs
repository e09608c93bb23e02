//! Pipeline commands

use agent_llm::{ChatClientConfig, ChatClientFactory};
use agent_research::{
    NewsTool, ResearchAgents, ResearchConfig, ResearchPipeline, SerpApiClient, StockTool,
    YahooMarketData,
};
use agent_review::{ReviewAgents, ReviewPipeline, ReviewVerdict};
use agent_utils::Settings;
use std::sync::Arc;
use tracing::info;

/// Run the market research pipeline and print the report
pub async fn research(settings: &Settings, task: Option<String>) -> anyhow::Result<()> {
    // Everything that can fail on configuration happens before the first call
    let config = ResearchConfig::from_settings(settings)?;
    let factory = ChatClientFactory::new(ChatClientConfig::from(&settings.completion));

    let agents = ResearchAgents::build(
        &factory,
        StockTool::new(Arc::new(YahooMarketData::new(&config)?)),
        NewsTool::from_config(Arc::new(SerpApiClient::new(&config)?), &config),
    )?;
    let pipeline = ResearchPipeline::from(agents);

    let task = task.unwrap_or_else(|| agent_research::prompts::DEFAULT_TASK.to_string());
    info!(model = %factory.model(), "Running market research");

    let report = pipeline.run(&task).await?;

    let degraded = report.degraded_stages();
    if !degraded.is_empty() {
        eprintln!(
            "⚠️ Data tools reported errors in: {} (report may be incomplete)",
            degraded.join(", ")
        );
    }

    println!("📊 Market Research Report:\n {}", report.report());
    Ok(())
}

/// Run the code review pipeline and print both responses and the decision
pub async fn review(settings: &Settings, task: Option<String>) -> anyhow::Result<()> {
    let factory = ChatClientFactory::new(ChatClientConfig::from(&settings.completion));
    let pipeline = ReviewPipeline::from_agents(ReviewAgents::build(&factory)?)?;

    let task = task.unwrap_or_else(|| agent_review::prompts::DEFAULT_TASK.to_string());
    info!(model = %factory.model(), "Running code review");

    println!("Starting code review process...\n");
    let outcome = pipeline.run(&task).await?;

    println!("🛠️ Programmer's response:\n {}", outcome.code_text());
    println!("🔍 Reviewer's feedback:\n {}", outcome.review_text());

    println!("{}", decision_line(outcome.verdict));
    Ok(())
}

/// Closing line printed for a review verdict
fn decision_line(verdict: ReviewVerdict) -> &'static str {
    match verdict {
        ReviewVerdict::Approved => "✅ Code review approved! Task completed.",
        ReviewVerdict::NeedsImprovement => {
            "❌ Code needs improvement. Please revise the implementation."
        }
    }
}
