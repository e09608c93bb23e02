//! Core abstractions for agent-rs
//!
//! An [`Agent`] turns one input string into an [`AgentOutput`]. Pipelines
//! chain agents and keep each stage's result in a run [`Context`].

pub mod agent;
pub mod context;
pub mod error;
pub mod output;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};
pub use output::{AgentOutput, ToolInvocation};
