//! Code review pipeline
//!
//! A programmer agent writes code for a task; a reviewer agent reviews it
//! once. A review containing [`APPROVAL_MARKER`] counts as approval.

pub mod agents;
pub mod pipeline;
pub mod prompts;
pub mod verdict;

pub use agents::ReviewAgents;
pub use pipeline::{ReviewOutcome, ReviewPipeline};
pub use prompts::APPROVAL_MARKER;
pub use verdict::ReviewVerdict;
