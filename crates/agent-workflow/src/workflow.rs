//! Sequential workflow definition and execution

use crate::stage::{StageResult, run_stage};
use agent_core::{Agent, Context, Error, Result};
use std::sync::Arc;

/// A fixed chain of agents
///
/// Each agent's output text is handed verbatim to the next agent. There is no
/// branching and no retry; the first error aborts the run.
///
/// # Example
///
/// ```no_run
/// use agent_core::{Agent, Context};
/// use agent_workflow::Workflow;
/// use std::sync::Arc;
///
/// # async fn example(programmer: Arc<dyn Agent>, reviewer: Arc<dyn Agent>) -> agent_core::Result<()> {
/// let workflow = Workflow::builder()
///     .add_agent(programmer)
///     .add_agent(reviewer)
///     .build()?;
///
/// let mut context = Context::new();
/// let stages = workflow.execute("Implement FileProcessor".to_string(), &mut context).await?;
/// println!("{}", stages[1].text());
/// # Ok(())
/// # }
/// ```
pub struct Workflow {
    steps: Vec<Arc<dyn Agent>>,
}

impl Workflow {
    /// Create a new workflow builder
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    /// Names of the steps, in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|a| a.name()).collect()
    }

    /// Execute the workflow
    ///
    /// # Returns
    ///
    /// One [`StageResult`] per step, in execution order. Each is also stored in
    /// `context` under the stage name.
    pub async fn execute(
        &self,
        initial_input: String,
        context: &mut Context,
    ) -> Result<Vec<StageResult>> {
        let mut stages: Vec<StageResult> = Vec::with_capacity(self.steps.len());
        let mut current_input = initial_input;

        for agent in &self.steps {
            let stage = run_stage(agent.as_ref(), current_input, context).await?;
            current_input = stage.output.text.clone();
            stages.push(stage);
        }

        Ok(stages)
    }
}

/// Builder for constructing workflows
#[derive(Default)]
pub struct WorkflowBuilder {
    steps: Vec<Arc<dyn Agent>>,
}

impl WorkflowBuilder {
    /// Create a new workflow builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an agent to the chain
    pub fn add_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.steps.push(agent);
        self
    }

    /// Build the workflow
    pub fn build(self) -> Result<Workflow> {
        if self.steps.is_empty() {
            return Err(Error::InitializationFailed(
                "Workflow has no steps".to_string(),
            ));
        }
        Ok(Workflow { steps: self.steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CallLog, RecordingAgent};

    #[test]
    fn test_empty_workflow_rejected() {
        assert!(matches!(
            Workflow::builder().build(),
            Err(Error::InitializationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_output_handed_to_next_step() {
        let log = CallLog::new();
        let workflow = Workflow::builder()
            .add_agent(Arc::new(RecordingAgent::new("programmer", "class FileProcessor", &log)))
            .add_agent(Arc::new(RecordingAgent::new("reviewer", "同意通过", &log)))
            .build()
            .unwrap();
        assert_eq!(workflow.step_names(), vec!["programmer", "reviewer"]);

        let mut context = Context::new();
        let stages = workflow
            .execute("requirements".to_string(), &mut context)
            .await
            .unwrap();

        assert_eq!(stages.len(), 2);
        assert_eq!(
            log.calls(),
            vec![
                ("programmer".to_string(), "requirements".to_string()),
                ("reviewer".to_string(), "class FileProcessor".to_string()),
            ]
        );
        assert!(context.contains_key("programmer"));
        assert!(context.contains_key("reviewer"));
    }

    #[tokio::test]
    async fn test_failure_stops_chain() {
        let log = CallLog::new();
        let workflow = Workflow::builder()
            .add_agent(Arc::new(RecordingAgent::failing("programmer", &log)))
            .add_agent(Arc::new(RecordingAgent::new("reviewer", "ok", &log)))
            .build()
            .unwrap();

        let mut context = Context::new();
        tokio_test::assert_err!(workflow.execute("task".to_string(), &mut context).await);
        assert_eq!(log.agents(), vec!["programmer"]);
        assert!(context.is_empty());
    }
}
