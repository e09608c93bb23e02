//! Concrete agent implementations
//!
//! - ToolAgent: stateless, every invocation starts from an empty history
//! - ConversationalAgent: remembers its own earlier exchanges

pub mod conversational;
pub mod tool;

pub use conversational::ConversationalAgent;
pub use tool::ToolAgent;
