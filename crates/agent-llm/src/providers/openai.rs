//! OpenAI-compatible `/chat/completions` client
//!
//! Works against any backend that speaks the OpenAI chat wire format. The
//! default base URL is OpenRouter.
//!
//! ```no_run
//! use agent_llm::providers::{OpenAIConfig, OpenAIProvider};
//! use agent_llm::{CompletionRequest, LLMProvider, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAIProvider::with_config(
//!         OpenAIConfig::new("sk-or-...").with_timeout(60),
//!     )?;
//!
//!     let request = CompletionRequest::builder("openai/gpt-4o-2024-11-20")
//!         .add_message(Message::user("用一句话介绍特斯拉"))
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.message.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

use crate::factory::DEFAULT_TIMEOUT_SECS;
use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Result, Role, StopReason, TokenUsage, ToolDefinition,
};
use agent_utils::DEFAULT_API_BASE;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Connection settings
#[derive(Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Without trailing slash
    pub api_base: String,
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Chat client for one backend
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Client with the default base URL and timeout
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, tools = request.tools.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = request.model.clone();
        let body = wire::ChatRequest::from(request);

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(map_error_status(status.as_u16(), text, model));
        }

        let body: wire::ChatResponse = response
            .json()
            .await
            .map_err(|e| LLMError::UnexpectedResponse(format!("undecodable body: {e}")))?;
        into_completion(body)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

fn map_error_status(status: u16, body: String, model: String) -> LLMError {
    match status {
        401 | 403 => LLMError::Authentication(body),
        429 => LLMError::RateLimited(body),
        400 => LLMError::InvalidRequest(body),
        404 => LLMError::ModelNotFound(model),
        _ => LLMError::Http { status, body },
    }
}

/// Turn the first choice into a completion
fn into_completion(body: wire::ChatResponse) -> Result<CompletionResponse> {
    let usage = body.usage.map(TokenUsage::from).unwrap_or_default();
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::UnexpectedResponse("response has no choices".to_string()))?;

    let finish_reason = choice.finish_reason.unwrap_or_default();
    debug!(
        finish_reason = %finish_reason,
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        "Completion received"
    );

    let message = assistant_message(choice.message)?;

    // Some compatible backends report "stop" even when tool calls are present
    let stop_reason = if message.has_tool_uses() {
        StopReason::ToolUse
    } else {
        StopReason::from_finish_reason(&finish_reason)
    };
    if stop_reason == StopReason::ContentFilter {
        debug!("Content filtered by backend safety systems");
    }

    Ok(CompletionResponse {
        message,
        stop_reason,
        usage,
    })
}

fn assistant_message(message: wire::ChatMessage) -> Result<Message> {
    let mut blocks = Vec::new();

    if let Some(text) = message.content.filter(|text| !text.is_empty()) {
        blocks.push(ContentBlock::Text { text });
    }

    for call in message.tool_calls.unwrap_or_default() {
        // Backends send "" for tools called without arguments
        let input = if call.function.arguments.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&call.function.arguments).map_err(|e| {
                LLMError::UnexpectedResponse(format!(
                    "tool call {} has malformed arguments: {e}",
                    call.id
                ))
            })?
        };

        blocks.push(ContentBlock::ToolUse {
            id: call.id,
            name: call.function.name,
            input,
        });
    }

    if blocks.is_empty() {
        blocks.push(ContentBlock::Text {
            text: String::new(),
        });
    }

    Ok(Message::assistant_blocks(blocks))
}

/// One conversation message may expand to several wire messages: tool
/// results each travel as their own `tool` role message after the turn
/// that carries the text and tool calls.
fn wire_messages(message: Message) -> Vec<wire::ChatMessage> {
    let role = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    };

    let blocks = match message.content {
        None => return vec![wire::ChatMessage::text(role, String::new())],
        Some(MessageContent::Text(text)) => return vec![wire::ChatMessage::text(role, text)],
        Some(MessageContent::Blocks(blocks)) => blocks,
    };

    let mut texts = Vec::new();
    let mut calls = Vec::new();
    let mut results = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => texts.push(text),
            ContentBlock::ToolUse { id, name, input } => calls.push(wire::ToolCall {
                id,
                kind: wire::FUNCTION.to_string(),
                function: wire::FunctionCall {
                    name,
                    arguments: input.to_string(),
                },
            }),
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => results.push(wire::ChatMessage {
                role: "tool".to_string(),
                content: Some(content),
                tool_calls: None,
                tool_call_id: Some(tool_use_id),
            }),
        }
    }

    let mut out = Vec::with_capacity(results.len() + 1);
    if !texts.is_empty() || !calls.is_empty() {
        out.push(wire::ChatMessage {
            role: role.to_string(),
            content: (!texts.is_empty()).then(|| texts.join("\n")),
            tool_calls: (!calls.is_empty()).then_some(calls),
            tool_call_id: None,
        });
    }
    out.extend(results);
    out
}

mod wire {
    use super::{CompletionRequest, TokenUsage, ToolDefinition, wire_messages};
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    pub const FUNCTION: &str = "function";

    #[derive(Debug, Serialize)]
    pub struct ChatRequest {
        pub model: String,
        pub messages: Vec<ChatMessage>,
        pub max_tokens: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub temperature: Option<f32>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub tools: Vec<Tool>,
    }

    impl From<CompletionRequest> for ChatRequest {
        fn from(request: CompletionRequest) -> Self {
            let mut messages = Vec::with_capacity(request.messages.len() + 1);
            if let Some(system) = request.system {
                messages.push(ChatMessage::text("system", system));
            }
            messages.extend(request.messages.into_iter().flat_map(wire_messages));

            Self {
                model: request.model,
                messages,
                max_tokens: request.max_tokens,
                temperature: request.temperature,
                tools: request.tools.iter().map(Tool::from).collect(),
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatMessage {
        #[serde(default)]
        pub role: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub tool_calls: Option<Vec<ToolCall>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub tool_call_id: Option<String>,
    }

    impl ChatMessage {
        pub fn text(role: &str, content: String) -> Self {
            Self {
                role: role.to_string(),
                content: Some(content),
                tool_calls: None,
                tool_call_id: None,
            }
        }
    }

    #[derive(Debug, Serialize)]
    pub struct Tool {
        #[serde(rename = "type")]
        pub kind: &'static str,
        pub function: FunctionSpec,
    }

    impl From<&ToolDefinition> for Tool {
        fn from(tool: &ToolDefinition) -> Self {
            Self {
                kind: FUNCTION,
                function: FunctionSpec {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.input_schema.clone(),
                },
            }
        }
    }

    #[derive(Debug, Serialize)]
    pub struct FunctionSpec {
        pub name: String,
        pub description: String,
        pub parameters: Value,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ToolCall {
        pub id: String,
        #[serde(rename = "type", default)]
        pub kind: String,
        pub function: FunctionCall,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FunctionCall {
        pub name: String,
        #[serde(default)]
        pub arguments: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ChatResponse {
        pub choices: Vec<Choice>,
        #[serde(default)]
        pub usage: Option<Usage>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Choice {
        pub message: ChatMessage,
        #[serde(default)]
        pub finish_reason: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Usage {
        #[serde(default)]
        pub prompt_tokens: usize,
        #[serde(default)]
        pub completion_tokens: usize,
    }

    impl From<Usage> for TokenUsage {
        fn from(usage: Usage) -> Self {
            Self {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(raw: Value) -> Result<CompletionResponse> {
        into_completion(serde_json::from_value(raw).unwrap())
    }

    #[test]
    fn test_defaults_point_at_openrouter() {
        let provider = OpenAIProvider::new("sk-test").unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.config().api_base, "https://openrouter.ai/api/v1");
        assert_eq!(provider.config().timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = OpenAIConfig::new("sk-test").with_api_base("http://localhost:1234/v1/");
        assert_eq!(config.completions_url(), "http://localhost:1234/v1/chat/completions");
        assert!(!format!("{config:?}").contains("sk-test"));
    }

    #[test]
    fn test_error_status_mapping() {
        let model = || "openai/gpt-4o".to_string();
        assert!(matches!(
            map_error_status(401, "bad key".into(), model()),
            LLMError::Authentication(_)
        ));
        assert!(matches!(
            map_error_status(403, "forbidden".into(), model()),
            LLMError::Authentication(_)
        ));
        assert!(matches!(
            map_error_status(429, "slow down".into(), model()),
            LLMError::RateLimited(_)
        ));
        assert!(matches!(
            map_error_status(400, "bad schema".into(), model()),
            LLMError::InvalidRequest(_)
        ));
        assert!(matches!(
            map_error_status(404, String::new(), model()),
            LLMError::ModelNotFound(m) if m == "openai/gpt-4o"
        ));
        assert!(matches!(
            map_error_status(502, "bad gateway".into(), model()),
            LLMError::Http { status: 502, .. }
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest::builder("openai/gpt-4o-2024-11-20")
            .system("你是一名新闻分析师。")
            .add_message(Message::user("task"))
            .temperature(0.5)
            .tools(vec![ToolDefinition::new(
                "news_fetcher",
                "Fetch recent news articles for a given query.",
                json!({"type": "object"}),
            )])
            .build();

        let body = serde_json::to_value(wire::ChatRequest::from(request)).unwrap();

        assert_eq!(
            body["messages"][0],
            json!({"role": "system", "content": "你是一名新闻分析师。"})
        );
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "news_fetcher");
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn test_plain_chat_omits_tools() {
        let request = CompletionRequest::builder("m")
            .add_message(Message::user("hi"))
            .build();
        let body = serde_json::to_value(wire::ChatRequest::from(request)).unwrap();
        assert!(body.get("tools").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_tool_turn_then_results() {
        let call = Message::assistant_blocks(vec![ContentBlock::ToolUse {
            id: "call_1".to_string(),
            name: "stock_market_data".to_string(),
            input: json!({"symbol": "TSLA"}),
        }]);
        let out = wire_messages(call);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].role, "assistant");
        assert!(out[0].content.is_none());
        let calls = out[0].tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.arguments, r#"{"symbol":"TSLA"}"#);

        let results = Message {
            role: Role::User,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::ToolResult {
                    tool_use_id: "call_1".to_string(),
                    content: "result 1".to_string(),
                    is_error: false,
                },
                ContentBlock::ToolResult {
                    tool_use_id: "call_2".to_string(),
                    content: "Error: boom".to_string(),
                    is_error: true,
                },
            ])),
        };
        let out = wire_messages(results);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|m| m.role == "tool"));
        assert_eq!(out[1].tool_call_id.as_deref(), Some("call_2"));
    }

    #[test]
    fn test_response_with_tool_calls() {
        let response = decode(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_123",
                        "type": "function",
                        "function": {"name": "stock_market_data", "arguments": "{\"symbol\":\"TSLA\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        }))
        .unwrap();

        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert_eq!(response.usage.total(), 15);
        let uses = response.message.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].id, "call_123");
        assert_eq!(uses[0].input["symbol"], "TSLA");
    }

    #[test]
    fn test_tool_calls_win_over_stop() {
        let response = decode(json!({
            "choices": [{
                "message": {
                    "content": "",
                    "tool_calls": [{"id": "c", "function": {"name": "news_fetcher", "arguments": ""}}]
                },
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert_eq!(response.message.tool_uses()[0].input, &json!({}));
    }

    #[test]
    fn test_response_without_usage_or_finish_reason() {
        let response = decode(json!({
            "choices": [{"message": {"role": "assistant", "content": "报告"}}]
        }))
        .unwrap();

        assert_eq!(response.message.text(), Some("报告"));
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(response.usage, TokenUsage::default());
    }

    #[test]
    fn test_malformed_arguments_and_empty_choices() {
        let bad_args = decode(json!({
            "choices": [{
                "message": {"tool_calls": [{"id": "c", "function": {"name": "x", "arguments": "{"}}]}
            }]
        }));
        assert!(matches!(bad_args, Err(LLMError::UnexpectedResponse(_))));

        let empty = decode(json!({"choices": []}));
        assert!(matches!(empty, Err(LLMError::UnexpectedResponse(_))));
    }
}
