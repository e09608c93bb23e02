//! Chat-completion layer for agent-rs
//!
//! Agents talk to a backend through [`LLMProvider`]: one call takes a
//! [`CompletionRequest`] (system prompt, conversation, offered tools) and
//! returns the assistant turn. [`ChatClientFactory`] builds the
//! OpenAI-compatible client the pipelines use.

pub mod completion;
pub mod error;
pub mod factory;
pub mod messages;
pub mod provider;
pub mod tools;

#[cfg(feature = "openai")]
pub mod providers;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use completion::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, StopReason, TokenUsage,
};
pub use error::{LLMError, Result};
pub use factory::{ChatClientConfig, ChatClientFactory};
pub use messages::{ContentBlock, Message, MessageContent, Role, ToolUse};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;
