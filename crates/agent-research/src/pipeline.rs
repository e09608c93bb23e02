//! Market research pipeline
//!
//! FinancialAnalyst and NewsAnalyst each receive the task with an empty
//! history; the Writer receives both outputs and produces the final report.
//! The stages run one after another, never concurrently.

use agent_core::{Agent, Context, Result};
use agent_workflow::{StageResult, run_stage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::agents::ResearchAgents;
use crate::prompts::writer_input;

/// Outcome of one research run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    /// The task that was researched
    pub task: String,
    /// Stock stage result
    pub stock: StageResult,
    /// News stage result
    pub news: StageResult,
    /// Writer stage result
    pub writer: StageResult,
}

impl ResearchReport {
    /// The writer's output, verbatim
    pub fn report(&self) -> &str {
        self.writer.text()
    }

    /// All stages in execution order
    pub fn stages(&self) -> [&StageResult; 3] {
        [&self.stock, &self.news, &self.writer]
    }

    /// Names of stages whose tool calls failed or returned an error payload
    pub fn degraded_stages(&self) -> Vec<&str> {
        self.stages()
            .into_iter()
            .filter(|s| s.is_degraded())
            .map(|s| s.stage.as_str())
            .collect()
    }
}

/// Fixed three-stage research pipeline
pub struct ResearchPipeline {
    financial_analyst: Arc<dyn Agent>,
    news_analyst: Arc<dyn Agent>,
    writer: Arc<dyn Agent>,
}

impl ResearchPipeline {
    /// Create a pipeline from explicit agents
    pub fn new(
        financial_analyst: Arc<dyn Agent>,
        news_analyst: Arc<dyn Agent>,
        writer: Arc<dyn Agent>,
    ) -> Self {
        Self {
            financial_analyst,
            news_analyst,
            writer,
        }
    }

    /// Run with a fresh context
    pub async fn run(&self, task: &str) -> Result<ResearchReport> {
        let mut context = Context::new();
        self.run_with_context(task, &mut context).await
    }

    /// Run, recording every stage in `context` under its stage name
    #[instrument(skip(self, context))]
    pub async fn run_with_context(
        &self,
        task: &str,
        context: &mut Context,
    ) -> Result<ResearchReport> {
        info!("Research pipeline started");

        let stock = run_stage(self.financial_analyst.as_ref(), task.to_string(), context).await?;
        let news = run_stage(self.news_analyst.as_ref(), task.to_string(), context).await?;
        let writer = run_stage(
            self.writer.as_ref(),
            writer_input(stock.text(), news.text()),
            context,
        )
        .await?;

        let report = ResearchReport {
            task: task.to_string(),
            stock,
            news,
            writer,
        };

        let degraded = report.degraded_stages();
        if degraded.is_empty() {
            info!("Research pipeline finished");
        } else {
            warn!(stages = ?degraded, "Research pipeline finished with degraded stages");
        }

        Ok(report)
    }
}

impl From<ResearchAgents> for ResearchPipeline {
    fn from(agents: ResearchAgents) -> Self {
        Self::new(agents.financial_analyst, agents.news_analyst, agents.writer)
    }
}
