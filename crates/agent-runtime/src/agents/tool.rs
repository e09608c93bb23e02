//! Stateless agent over an [`AgentExecutor`]

use crate::executor::AgentExecutor;
use agent_core::{Agent, AgentOutput, Context, Result};
use async_trait::async_trait;

/// A stateless agent that uses the LLM loop with tool execution
///
/// Every call to [`Agent::process`] starts from an empty history, so one
/// invocation never sees another's conversation.
///
/// # Example
///
/// ```no_run
/// use agent_core::{Agent, Context};
/// use agent_llm::ChatClientFactory;
/// use agent_runtime::{AgentExecutor, ToolAgent};
///
/// # async fn example(factory: ChatClientFactory) -> agent_core::Result<()> {
/// let executor = AgentExecutor::builder()
///     .provider(factory.build()?)
///     .model(factory.model())
///     .system_prompt("你是一名金融分析师。")
///     .build()?;
/// let agent = ToolAgent::new(executor, "financial-analyst");
///
/// let mut context = Context::new();
/// let output = agent.process("Research TSLA".to_string(), &mut context).await?;
/// println!("{}", output.text);
/// # Ok(())
/// # }
/// ```
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<AgentOutput> {
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
