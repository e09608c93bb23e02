//! Stateful agent that remembers its own exchanges

use crate::executor::AgentExecutor;
use crate::memory::ConversationMemory;
use agent_core::{Agent, AgentOutput, Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

/// An agent whose later runs see the user/assistant turns of earlier ones
///
/// Memory lives only as long as the agent. A failed run leaves it untouched.
pub struct ConversationalAgent {
    executor: AgentExecutor,
    name: String,
    memory: Mutex<ConversationMemory>,
}

impl ConversationalAgent {
    /// Create a new agent with empty memory
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
            memory: Mutex::new(ConversationMemory::new()),
        }
    }

    /// Run one turn and remember it
    pub async fn run(&self, input: String) -> Result<AgentOutput> {
        // Held across the call so that turns are appended in call order
        let mut memory = self.memory.lock().await;
        let history = memory.messages().to_vec();
        debug!(agent = %self.name, history_len = history.len(), "Running with memory");

        let output = self
            .executor
            .run_with_history(input.clone(), history)
            .await?;
        memory.record_exchange(input, output.text.clone());

        Ok(output)
    }

    /// Snapshot of the memory
    pub async fn memory(&self) -> ConversationMemory {
        self.memory.lock().await.clone()
    }
}

#[async_trait]
impl Agent for ConversationalAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<AgentOutput> {
        self.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
