//! Conversation messages
//!
//! A conversation is a list of [`Message`]s. Plain turns carry a string;
//! tool-calling turns carry [`ContentBlock`]s so an assistant request and the
//! matching results can be paired by id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Only produced by providers that inline the system prompt
    System,
}

/// One piece of a structured message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    /// The assistant asks for a tool to be run
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    /// Answer to the `ToolUse` with the same id
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        is_error: bool,
    },
}

/// Message body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// Borrowed view of a tool request inside an assistant message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolUse<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub input: &'a Value,
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// User turn with plain text
    pub fn user(text: impl Into<String>) -> Self {
        Self::plain(Role::User, text.into())
    }

    /// Assistant turn with plain text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, text.into())
    }

    /// Assistant turn made of blocks, typically text plus tool requests
    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(blocks)),
        }
    }

    /// Successful result for the tool call `tool_use_id`
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::result_block(tool_use_id.into(), content.into(), false)
    }

    /// Failed result for the tool call `tool_use_id`
    pub fn tool_error(tool_use_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self::result_block(tool_use_id.into(), error.into(), true)
    }

    fn plain(role: Role, text: String) -> Self {
        Self {
            role,
            content: Some(MessageContent::Text(text)),
        }
    }

    fn result_block(tool_use_id: String, content: String, is_error: bool) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Blocks(vec![ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            }])),
        }
    }

    /// First text found in the message
    pub fn text(&self) -> Option<&str> {
        match self.content.as_ref()? {
            MessageContent::Text(text) => Some(text),
            MessageContent::Blocks(blocks) => blocks.iter().find_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            }),
        }
    }

    /// Tool requests in the order the model issued them
    pub fn tool_uses(&self) -> Vec<ToolUse<'_>> {
        let Some(MessageContent::Blocks(blocks)) = &self.content else {
            return Vec::new();
        };

        blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolUse { id, name, input }),
                _ => None,
            })
            .collect()
    }

    pub fn has_tool_uses(&self) -> bool {
        matches!(
            &self.content,
            Some(MessageContent::Blocks(blocks))
                if blocks.iter().any(|block| matches!(block, ContentBlock::ToolUse { .. }))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_turns() {
        let question = Message::user("特斯拉最近怎么样？");
        assert_eq!(question.role, Role::User);
        assert_eq!(question.text(), Some("特斯拉最近怎么样？"));

        let answer = Message::assistant("股价上涨");
        assert_eq!(answer.role, Role::Assistant);
        assert!(!answer.has_tool_uses());
        assert!(answer.tool_uses().is_empty());
    }

    #[test]
    fn test_tool_uses_in_order() {
        let msg = Message::assistant_blocks(vec![
            ContentBlock::Text {
                text: "Fetching data".to_string(),
            },
            ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: "stock_market_data".to_string(),
                input: json!({"symbol": "TSLA"}),
            },
            ContentBlock::ToolUse {
                id: "call_2".to_string(),
                name: "news_fetcher".to_string(),
                input: json!({"query": "Tesla"}),
            },
        ]);

        let uses = msg.tool_uses();
        assert!(msg.has_tool_uses());
        assert_eq!(uses.len(), 2);
        assert_eq!(uses[0].name, "stock_market_data");
        assert_eq!(uses[0].input["symbol"], "TSLA");
        assert_eq!(uses[1].id, "call_2");
        assert_eq!(msg.text(), Some("Fetching data"));
    }

    #[test]
    fn test_tool_error_flag_serialization() {
        let ok = serde_json::to_value(Message::tool_result("call_1", "{}")).unwrap();
        assert!(ok["content"][0].get("is_error").is_none());

        let failed = serde_json::to_value(Message::tool_error("call_1", "boom")).unwrap();
        assert_eq!(failed["role"], "user");
        assert_eq!(failed["content"][0]["type"], "tool_result");
        assert_eq!(failed["content"][0]["is_error"], true);
    }

    #[test]
    fn test_missing_error_flag_defaults_to_false() {
        let block: ContentBlock = serde_json::from_value(json!({
            "type": "tool_result",
            "tool_use_id": "call_9",
            "content": "ok"
        }))
        .unwrap();

        assert_eq!(
            block,
            ContentBlock::ToolResult {
                tool_use_id: "call_9".to_string(),
                content: "ok".to_string(),
                is_error: false,
            }
        );
    }
}
