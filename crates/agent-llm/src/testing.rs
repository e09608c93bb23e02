//! Scripted provider for tests
//!
//! [`ScriptedProvider`] replays a fixed queue of responses and records every
//! request it receives, so agent loops can be driven without a network.

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message, Result,
    StopReason, TokenUsage,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Provider that answers from a queue
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<CompletionResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text answer
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(Ok(text_response(text)));
        self
    }

    /// Queue a single tool call
    pub fn with_tool_call(self, id: &str, name: &str, input: Value) -> Self {
        self.push(Ok(tool_call_response(vec![(id, name, input)])));
        self
    }

    /// Queue a turn requesting several tool calls
    pub fn with_tool_calls(self, calls: Vec<(&str, &str, Value)>) -> Self {
        self.push(Ok(tool_call_response(calls)));
        self
    }

    /// Queue a failure
    pub fn with_error(self, error: LLMError) -> Self {
        self.push(Err(error));
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of responses still queued
    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    fn push(&self, response: Result<CompletionResponse>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(LLMError::UnexpectedResponse(
                    "scripted provider has no responses left".to_string(),
                ))
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A final text answer
pub fn text_response(text: impl Into<String>) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage::default(),
    }
}

/// An assistant turn requesting the given `(id, name, input)` tool calls
pub fn tool_call_response(calls: Vec<(&str, &str, Value)>) -> CompletionResponse {
    let blocks = calls
        .into_iter()
        .map(|(id, name, input)| ContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input,
        })
        .collect();

    CompletionResponse {
        message: Message::assistant_blocks(blocks),
        stop_reason: StopReason::ToolUse,
        usage: TokenUsage::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest::builder("test-model")
            .add_message(Message::user("hi"))
            .build()
    }

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let provider = ScriptedProvider::new()
            .with_tool_call("call_1", "stock_market_data", json!({"symbol": "TSLA"}))
            .with_text("done");

        let first = tokio_test::assert_ok!(provider.complete(request()).await);
        assert_eq!(first.stop_reason, StopReason::ToolUse);
        assert!(first.message.has_tool_uses());

        let second = provider.complete(request()).await.unwrap();
        assert_eq!(second.message.text(), Some("done"));

        assert_eq!(provider.requests().len(), 2);
        assert_eq!(provider.remaining(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let provider = ScriptedProvider::new();
        let result = provider.complete(request()).await;
        assert!(matches!(result, Err(LLMError::UnexpectedResponse(_))));
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let provider =
            ScriptedProvider::new().with_error(LLMError::Authentication("401".to_string()));
        let result = provider.complete(request()).await;
        assert!(matches!(result, Err(LLMError::Authentication(_))));
    }
}
