//! Code review pipeline
//!
//! One Programmer → Reviewer pass. The verdict is reported but never loops
//! back to the programmer.

use agent_core::{Agent, Context, Error, Result};
use agent_workflow::{StageResult, Workflow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::agents::ReviewAgents;
use crate::verdict::ReviewVerdict;

/// Outcome of one review run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    /// Programmer stage
    pub code: StageResult,
    /// Reviewer stage
    pub review: StageResult,
    /// Decision derived from the review text
    pub verdict: ReviewVerdict,
}

impl ReviewOutcome {
    /// The programmer's response
    pub fn code_text(&self) -> &str {
        self.code.text()
    }

    /// The reviewer's feedback
    pub fn review_text(&self) -> &str {
        self.review.text()
    }
}

/// Fixed Programmer → Reviewer pipeline
pub struct ReviewPipeline {
    workflow: Workflow,
}

impl ReviewPipeline {
    /// Create a pipeline from explicit agents
    pub fn new(programmer: Arc<dyn Agent>, reviewer: Arc<dyn Agent>) -> Result<Self> {
        let workflow = Workflow::builder()
            .add_agent(programmer)
            .add_agent(reviewer)
            .build()?;
        Ok(Self { workflow })
    }

    /// Create a pipeline from built agents
    pub fn from_agents(agents: ReviewAgents) -> Result<Self> {
        Self::new(agents.programmer, agents.reviewer)
    }

    /// Run with a fresh context
    pub async fn run(&self, task: &str) -> Result<ReviewOutcome> {
        let mut context = Context::new();
        self.run_with_context(task, &mut context).await
    }

    /// Run, recording both stages in `context`
    #[instrument(skip(self, task, context), fields(task_length = task.len()))]
    pub async fn run_with_context(&self, task: &str, context: &mut Context) -> Result<ReviewOutcome> {
        info!("Code review started");

        let mut stages = self
            .workflow
            .execute(task.to_string(), context)
            .await?
            .into_iter();

        let (Some(code), Some(review)) = (stages.next(), stages.next()) else {
            return Err(Error::ProcessingFailed(
                "Review workflow produced fewer than two stages".to_string(),
            ));
        };

        let verdict = ReviewVerdict::from_review(review.text());
        info!(%verdict, "Code review finished");

        Ok(ReviewOutcome {
            code,
            review,
            verdict,
        })
    }
}
