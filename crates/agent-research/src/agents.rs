//! Construction of the three research agents

use agent_core::{Agent, Result};
use agent_llm::{ChatClientFactory, LLMProvider};
use agent_runtime::{AgentExecutor, ToolAgent};
use agent_tools::{Tool, ToolRegistry};
use std::sync::Arc;

use crate::prompts::{
    FINANCIAL_ANALYST, FINANCIAL_ANALYST_PROMPT, NEWS_ANALYST, NEWS_ANALYST_PROMPT, WRITER,
    WRITER_PROMPT,
};
use crate::tools::{NewsTool, StockTool};

/// Model parameters shared by all research agents
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl From<&ChatClientFactory> for ModelParams {
    fn from(factory: &ChatClientFactory) -> Self {
        Self {
            model: factory.model().to_string(),
            temperature: factory.temperature(),
        }
    }
}

/// The three stateless agents of the research pipeline
pub struct ResearchAgents {
    /// Uses the stock tool
    pub financial_analyst: Arc<dyn Agent>,
    /// Uses the news tool
    pub news_analyst: Arc<dyn Agent>,
    /// Writes the report, no tools
    pub writer: Arc<dyn Agent>,
}

impl ResearchAgents {
    /// Build the agents, each with its own client from `factory`
    pub fn build(
        factory: &ChatClientFactory,
        stock_tool: StockTool,
        news_tool: NewsTool,
    ) -> Result<Self> {
        Self::assemble(
            || factory.build(),
            &ModelParams::from(factory),
            stock_tool,
            news_tool,
        )
    }

    /// Build the agents from any client source
    pub fn assemble<F>(
        mut client: F,
        params: &ModelParams,
        stock_tool: StockTool,
        news_tool: NewsTool,
    ) -> Result<Self>
    where
        F: FnMut() -> agent_llm::Result<Arc<dyn LLMProvider>>,
    {
        let financial_analyst = tool_agent(
            client()?,
            params,
            FINANCIAL_ANALYST,
            FINANCIAL_ANALYST_PROMPT,
            vec![Arc::new(stock_tool) as Arc<dyn Tool>],
        )?;
        let news_analyst = tool_agent(
            client()?,
            params,
            NEWS_ANALYST,
            NEWS_ANALYST_PROMPT,
            vec![Arc::new(news_tool) as Arc<dyn Tool>],
        )?;
        let writer = tool_agent(client()?, params, WRITER, WRITER_PROMPT, Vec::new())?;

        Ok(Self {
            financial_analyst: Arc::new(financial_analyst),
            news_analyst: Arc::new(news_analyst),
            writer: Arc::new(writer),
        })
    }
}

fn tool_agent(
    provider: Arc<dyn LLMProvider>,
    params: &ModelParams,
    name: &str,
    system_prompt: &str,
    tools: Vec<Arc<dyn Tool>>,
) -> Result<ToolAgent> {
    let executor = AgentExecutor::builder()
        .provider(provider)
        .tool_registry(Arc::new(ToolRegistry::with_tools(tools)))
        .model(params.model.clone())
        .temperature(params.temperature)
        .system_prompt(system_prompt)
        .build()?;

    Ok(ToolAgent::new(executor, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockMarketDataSource, MockNewsSearch};
    use agent_core::Context;
    use agent_llm::testing::ScriptedProvider;

    fn params() -> ModelParams {
        ModelParams {
            model: "openai/gpt-4o-2024-11-20".to_string(),
            temperature: 0.5,
        }
    }

    #[tokio::test]
    async fn test_each_agent_gets_its_persona_and_tools() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_text("stock")
                .with_text("news")
                .with_text("report"),
        );
        let mut built = 0;
        let agents = ResearchAgents::assemble(
            || {
                built += 1;
                Ok(provider.clone() as Arc<dyn LLMProvider>)
            },
            &params(),
            StockTool::new(Arc::new(MockMarketDataSource::new())),
            NewsTool::new(Arc::new(MockNewsSearch::new())),
        )
        .unwrap();
        assert_eq!(built, 3);

        let mut context = Context::new();
        for agent in [&agents.financial_analyst, &agents.news_analyst, &agents.writer] {
            agent.process("task".to_string(), &mut context).await.unwrap();
        }

        let requests = provider.requests();
        assert_eq!(requests[0].system.as_deref(), Some(FINANCIAL_ANALYST_PROMPT));
        assert_eq!(requests[0].tool_names(), vec!["stock_market_data"]);
        assert_eq!(requests[1].system.as_deref(), Some(NEWS_ANALYST_PROMPT));
        assert_eq!(requests[1].tool_names(), vec!["news_fetcher"]);
        assert_eq!(requests[2].system.as_deref(), Some(WRITER_PROMPT));
        assert!(!requests[2].has_tools());
        assert!(requests.iter().all(|r| r.temperature == Some(0.5)));

        assert_eq!(agents.financial_analyst.name(), FINANCIAL_ANALYST);
        assert_eq!(agents.writer.name(), WRITER);
    }

    #[test]
    fn test_client_failure_propagates() {
        let result = ResearchAgents::assemble(
            || Err(agent_llm::LLMError::Configuration("API key is empty".to_string())),
            &params(),
            StockTool::new(Arc::new(MockMarketDataSource::new())),
            NewsTool::new(Arc::new(MockNewsSearch::new())),
        );
        assert!(matches!(result, Err(agent_core::Error::Configuration(_))));
    }
}
