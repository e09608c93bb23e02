//! The completion client seam

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A chat-completion backend
///
/// One call is one round-trip. When the request offers tools the backend
/// alone decides whether to answer or to ask for tool calls.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}
