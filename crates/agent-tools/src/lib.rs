//! Tools for agent-rs
//!
//! A [`Tool`] is looked up by name in a [`ToolRegistry`] when the model asks
//! for it. Arguments arrive as JSON; [`text_argument`] reads the single-string
//! form the data tools take.

pub mod args;
pub mod registry;
pub mod tool;

pub use args::text_argument;
pub use registry::ToolRegistry;
pub use tool::{Tool, error_payload};
