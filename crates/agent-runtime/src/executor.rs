//! Tool-calling loop around a single provider
//!
//! Each round sends the whole conversation plus the registered tools. When the
//! model answers with tool requests, every request is run, its result is
//! appended as a tool result, and the next round starts. Any other answer ends
//! the run. The number of rounds is bounded by [`ExecutorConfig::max_iterations`].

use agent_core::{AgentOutput, Result, ToolInvocation};
use agent_llm::{
    CompletionRequest, CompletionResponse, LLMProvider, Message, StopReason, TokenUsage,
    ToolDefinition, ToolUse,
};
use agent_tools::ToolRegistry;
use agent_utils::DEFAULT_MODEL;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Text returned when the loop bound is hit
pub const MAX_ITERATIONS_MESSAGE: &str = "Max iterations reached without completion";

const PREVIEW_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Upper bound on completion round-trips for one run
    pub max_iterations: usize,
    pub model: String,
    pub system_prompt: Option<String>,
    /// Generation budget per round-trip
    pub max_tokens: usize,
    /// Backend default when unset
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: None,
        }
    }
}

/// Outcome of one round-trip
enum Round {
    /// Tool results were appended; ask the model again
    ToolsRan,
    Finished(String),
}

/// Runs one agent persona: a provider, the tools it may call and its settings
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Answer `user_message` starting from an empty conversation
    pub async fn run(&self, user_message: String) -> Result<AgentOutput> {
        self.run_with_history(user_message, Vec::new()).await
    }

    /// Answer `user_message` after `history` (oldest first)
    ///
    /// Provider failures end the run with the provider's error kind. Tool
    /// failures never do: the model sees them as error results and the
    /// returned output lists them as failed invocations.
    pub async fn run_with_history(
        &self,
        user_message: String,
        mut history: Vec<Message>,
    ) -> Result<AgentOutput> {
        history.push(Message::user(user_message));

        let tools = self.tool_definitions();
        let mut invocations = Vec::new();
        let mut usage = TokenUsage::default();

        for round in 1..=self.config.max_iterations {
            debug!(round, model = %self.config.model, tools = tools.len(), "Requesting completion");

            let response = self.provider.complete(self.request(&history, &tools)).await?;
            usage += response.usage;

            match self.settle(response, &mut history, &mut invocations).await {
                Round::ToolsRan => {}
                Round::Finished(text) => {
                    info!(
                        rounds = round,
                        tool_calls = invocations.len(),
                        total_tokens = usage.total(),
                        chars = text.len(),
                        "Agent finished"
                    );
                    return Ok(AgentOutput::text(text).with_tool_calls(invocations));
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            tool_calls = invocations.len(),
            "Agent gave up without a final answer"
        );
        Ok(AgentOutput::text(MAX_ITERATIONS_MESSAGE).with_tool_calls(invocations))
    }

    /// Fold one response into the conversation and decide whether to go on
    async fn settle(
        &self,
        response: CompletionResponse,
        history: &mut Vec<Message>,
        invocations: &mut Vec<ToolInvocation>,
    ) -> Round {
        let CompletionResponse {
            message,
            stop_reason,
            usage,
        } = response;

        debug!(
            ?stop_reason,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            preview = %preview(message.text().unwrap_or_default(), PREVIEW_CHARS),
            "Completion received"
        );

        if message.has_tool_uses() {
            let (results, ran) = self.run_tools(&message).await;
            history.push(message);
            history.extend(results);
            invocations.extend(ran);
            return Round::ToolsRan;
        }

        // Some backends report `tool_calls` for a plain answer; the text stands
        if stop_reason == StopReason::ToolUse {
            warn!("Stop reason asked for tools but none were requested");
        }

        let non_empty_text = message.text().filter(|text| !text.is_empty()).map(str::to_string);
        history.push(message);
        let fallback = match stop_reason {
            StopReason::MaxTokens => {
                warn!("Completion cut at the token limit");
                "Response truncated due to token limit"
            }
            StopReason::ContentFilter => {
                warn!("Completion withheld by the content filter");
                "Response withheld by content filter"
            }
            StopReason::EndTurn | StopReason::ToolUse => "No response",
        };
        Round::Finished(non_empty_text.unwrap_or_else(|| fallback.to_string()))
    }

    fn request(&self, history: &[Message], tools: &[ToolDefinition]) -> CompletionRequest {
        let config = &self.config;
        let mut request = CompletionRequest::builder(&config.model)
            .messages(history.to_vec())
            .max_tokens(config.max_tokens)
            .tools(tools.to_vec());

        if let Some(system) = &config.system_prompt {
            request = request.system(system.clone());
        }
        if let Some(temperature) = config.temperature {
            request = request.temperature(temperature);
        }
        request.build()
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Run every tool request in `message`, in order
    async fn run_tools(&self, message: &Message) -> (Vec<Message>, Vec<ToolInvocation>) {
        let requests = message.tool_uses();
        let mut results = Vec::with_capacity(requests.len());
        let mut ran = Vec::with_capacity(requests.len());

        for ToolUse { id, name, input } in requests {
            let outcome = match self.tool_registry.get(name) {
                None => {
                    warn!(tool = name, "Model asked for an unregistered tool");
                    Err(format!("Error: Tool not found: {name}"))
                }
                Some(tool) => {
                    let started = Instant::now();
                    let outcome = tool.execute(input.clone()).await;
                    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    match outcome {
                        Ok(output) => {
                            info!(tool = name, call_id = id, elapsed_ms, "Tool call succeeded");
                            Ok(output)
                        }
                        Err(e) => {
                            warn!(tool = name, call_id = id, elapsed_ms, error = %e, "Tool call failed");
                            Err(format!("Error: {e}"))
                        }
                    }
                }
            };

            let (result, output, failed) = match outcome {
                Ok(output) => (Message::tool_result(id, output.to_string()), output, false),
                Err(error) => (Message::tool_error(id, error.clone()), Value::String(error), true),
            };
            results.push(result);
            ran.push(ToolInvocation {
                id: id.to_string(),
                name: name.to_string(),
                input: input.clone(),
                output,
                failed,
            });
        }

        (results, ran)
    }
}

fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Step-by-step construction of an [`AgentExecutor`]
///
/// Starts from [`ExecutorConfig::default`] and an empty tool registry; only
/// the provider is mandatory.
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Replace every setting at once
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Fails with `InitializationFailed` when no provider was given
    pub fn build(self) -> Result<AgentExecutor> {
        let Some(provider) = self.provider else {
            return Err(agent_core::Error::InitializationFailed(
                "Provider not set".to_string(),
            ));
        };
        Ok(AgentExecutor::new(provider, self.tool_registry, self.config))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
