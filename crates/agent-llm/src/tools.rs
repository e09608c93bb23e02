//! Tool descriptions offered to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a tool is advertised to the backend
///
/// `name` must match the name the tool is registered under; the model's
/// requests are routed by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// JSON Schema helpers
pub mod schema {
    use serde_json::{Value, json};

    /// Object schema for a tool that takes exactly one required string
    ///
    /// ```
    /// use agent_llm::tools::schema;
    ///
    /// let schema = schema::single_string("symbol", "Stock ticker symbol (e.g., 'TSLA')");
    /// assert_eq!(schema["required"][0], "symbol");
    /// assert_eq!(schema["properties"]["symbol"]["type"], "string");
    /// ```
    pub fn single_string(field: &str, description: &str) -> Value {
        let mut properties = serde_json::Map::new();
        properties.insert(
            field.to_string(),
            json!({"type": "string", "description": description}),
        );

        json!({
            "type": "object",
            "properties": properties,
            "required": [field],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_string_schema() {
        let schema = schema::single_string("query", "News search query");
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "News search query"}
                },
                "required": ["query"]
            })
        );

        let tool = ToolDefinition::new("news_fetcher", "Fetch recent news", schema.clone());
        assert_eq!(tool.input_schema, schema);
    }
}
