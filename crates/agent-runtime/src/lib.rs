//! Agent runtime for executing agents
//!
//! This crate provides the AgentExecutor that drives the LLM/tool loop and
//! the two agent variants built on top of it.

pub mod agents;
pub mod executor;
pub mod memory;

// Re-export key types
pub use agents::{ConversationalAgent, ToolAgent};
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig, MAX_ITERATIONS_MESSAGE};
pub use memory::ConversationMemory;
