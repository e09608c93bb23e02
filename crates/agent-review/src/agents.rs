//! Construction of the programmer and reviewer agents

use agent_core::{Agent, Result};
use agent_llm::{ChatClientFactory, LLMProvider};
use agent_runtime::{AgentExecutor, ConversationalAgent};
use std::sync::Arc;

use crate::prompts::{PROGRAMMER, PROGRAMMER_PROMPT, REVIEWER, REVIEWER_PROMPT};

/// The two stateful agents of the review pipeline
pub struct ReviewAgents {
    /// Writes the code
    pub programmer: Arc<dyn Agent>,
    /// Reviews it
    pub reviewer: Arc<dyn Agent>,
}

impl ReviewAgents {
    /// Build the agents, each with its own client from `factory`
    pub fn build(factory: &ChatClientFactory) -> Result<Self> {
        Self::assemble(|| factory.build(), factory.model(), factory.temperature())
    }

    /// Build the agents from any client source
    pub fn assemble<F>(mut client: F, model: &str, temperature: f32) -> Result<Self>
    where
        F: FnMut() -> agent_llm::Result<Arc<dyn LLMProvider>>,
    {
        let mut agent = |name: &str, prompt: &str| -> Result<ConversationalAgent> {
            let executor = AgentExecutor::builder()
                .provider(client()?)
                .model(model)
                .temperature(temperature)
                .system_prompt(prompt)
                .build()?;
            Ok(ConversationalAgent::new(executor, name))
        };

        let programmer = agent(PROGRAMMER, PROGRAMMER_PROMPT)?;
        let reviewer = agent(REVIEWER, REVIEWER_PROMPT)?;

        Ok(Self {
            programmer: Arc::new(programmer),
            reviewer: Arc::new(reviewer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Context;
    use agent_llm::testing::ScriptedProvider;

    #[tokio::test]
    async fn test_personas_and_memory() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_text("class FileProcessor: ...")
                .with_text("v2"),
        );
        let agents = ReviewAgents::assemble(
            || Ok(provider.clone() as Arc<dyn LLMProvider>),
            "openai/gpt-4o-2024-11-20",
            0.5,
        )
        .unwrap();
        assert_eq!(agents.programmer.name(), PROGRAMMER);
        assert_eq!(agents.reviewer.name(), REVIEWER);

        let mut context = Context::new();
        agents
            .programmer
            .process("task".to_string(), &mut context)
            .await
            .unwrap();
        agents
            .programmer
            .process("revise".to_string(), &mut context)
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests[0].system.as_deref(), Some(PROGRAMMER_PROMPT));
        assert!(!requests[0].has_tools());
        // The second run carries the first exchange
        assert_eq!(requests[1].messages.len(), 3);
    }
}
