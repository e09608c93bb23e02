//! Multi-agent orchestration for agent-rs
//!
//! This crate provides typed stage handoffs and the sequential [`Workflow`]
//! that chains agents together.

pub mod stage;
pub mod workflow;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Re-export for convenience
pub use stage::{StageResult, run_stage};
pub use workflow::{Workflow, WorkflowBuilder};
