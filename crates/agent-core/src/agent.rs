//! Core Agent trait definition

use crate::{AgentOutput, Context, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// Input and output are free text; the output additionally records the tool
/// calls made while producing it. Concrete implementations decide whether
/// earlier invocations are remembered.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    async fn process(&self, input: String, context: &mut Context) -> Result<AgentOutput>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use std::sync::Arc;

    mock! {
        pub Stage {}

        #[async_trait]
        impl Agent for Stage {
            async fn process(&self, input: String, context: &mut Context) -> Result<AgentOutput>;
            fn name(&self) -> &str;
        }
    }

    #[tokio::test]
    async fn test_agent_is_object_safe() {
        let mut stage = MockStage::new();
        stage
            .expect_process()
            .withf(|input, _| input == "task")
            .times(1)
            .returning(|input, _| Ok(AgentOutput::text(format!("done: {input}"))));
        stage.expect_name().return_const("writer".to_string());

        let agent: Arc<dyn Agent> = Arc::new(stage);
        let mut context = Context::new();

        let output = agent.process("task".to_string(), &mut context).await;
        let output = tokio_test::assert_ok!(output);
        assert_eq!(output.text, "done: task");
        assert_eq!(agent.name(), "writer");
    }
}
