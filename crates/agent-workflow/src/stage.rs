//! Typed handoff records

use agent_core::{Agent, AgentOutput, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Record of one agent invocation inside a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    /// Stage name (the agent's name)
    pub stage: String,
    /// Input text handed to the agent
    pub input: String,
    /// What the agent produced
    pub output: AgentOutput,
}

impl StageResult {
    /// The output text, which is what the next stage receives
    pub fn text(&self) -> &str {
        &self.output.text
    }

    /// Whether any tool call of this stage failed or reported an error
    pub fn is_degraded(&self) -> bool {
        self.output.tool_errors().next().is_some()
    }
}

/// Invoke one agent and record the result in the context under its name
pub async fn run_stage(
    agent: &dyn Agent,
    input: String,
    context: &mut Context,
) -> Result<StageResult> {
    let stage = agent.name().to_string();
    info!(stage = %stage, input_length = input.len(), "Stage started");

    let output = agent.process(input.clone(), context).await?;

    info!(
        stage = %stage,
        output_length = output.text.len(),
        tool_calls = output.tool_calls.len(),
        "Stage finished"
    );

    let result = StageResult {
        stage,
        input,
        output,
    };
    context.insert_typed(result.stage.clone(), &result)?;
    Ok(result)
}
