//! Agent doubles for pipeline tests

use agent_core::{Agent, AgentOutput, Context, Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

/// Shared, ordered log of `(agent name, input)` calls
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl CallLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, agent: &str, input: &str) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((agent.to_string(), input.to_string()));
    }

    /// Every call so far, oldest first
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Agent names in call order
    pub fn agents(&self) -> Vec<String> {
        self.calls().into_iter().map(|(agent, _)| agent).collect()
    }

    /// Inputs received by one agent
    pub fn inputs_of(&self, agent: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == agent)
            .map(|(_, input)| input)
            .collect()
    }
}

/// Agent that logs every call and answers with a fixed output
pub struct RecordingAgent {
    name: String,
    reply: Option<AgentOutput>,
    log: CallLog,
}

impl RecordingAgent {
    /// Agent answering `reply` to every input
    pub fn new(name: impl Into<String>, reply: impl Into<String>, log: &CallLog) -> Self {
        Self::with_output(name, AgentOutput::text(reply), log)
    }

    /// Agent answering a full output, tool calls included
    pub fn with_output(name: impl Into<String>, output: AgentOutput, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            reply: Some(output),
            log: log.clone(),
        }
    }

    /// Agent that fails every call
    pub fn failing(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            reply: None,
            log: log.clone(),
        }
    }
}

#[async_trait]
impl Agent for RecordingAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<AgentOutput> {
        self.log.record(&self.name, &input);
        self.reply.clone().ok_or_else(|| Error::ExternalService {
            service: "completion".to_string(),
            message: format!("{} failed", self.name),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
