//! The tool seam

use agent_core::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::fmt::Display;

/// A function the model may ask an agent to run
///
/// `name`, `description` and `input_schema` are what the model sees. `name`
/// is also the registry key the request is routed by.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Run with the arguments the model supplied
    ///
    /// Data tools report expected failures in-band through
    /// [`error_payload`] and keep `Err` for faults in the tool itself.
    async fn execute(&self, params: Value) -> Result<Value>;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    fn input_schema(&self) -> Value;
}

/// The in-band failure shape `{"error": message}`
///
/// ```
/// let payload = agent_tools::error_payload("No news found");
/// assert_eq!(payload["error"], "No news found");
/// ```
pub fn error_payload(message: impl Display) -> Value {
    json!({ "error": message.to_string() })
}
