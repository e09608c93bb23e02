//! Per-run scratch space
//!
//! Pipelines record each stage's result here under the stage name, so the
//! handoffs of a run stay inspectable after it finishes.

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON entries keyed by name
///
/// ```
/// use agent_core::{AgentOutput, Context};
///
/// let mut ctx = Context::new();
/// ctx.insert_typed("writer", &AgentOutput::text("最终报告")).unwrap();
///
/// let stored: AgentOutput = ctx.get_typed("writer").unwrap().unwrap();
/// assert_eq!(stored.text, "最终报告");
/// assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["writer"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Store any serializable value
    pub fn insert_typed<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> Result<()> {
        let key = key.into();
        let value = serde_json::to_value(value)
            .map_err(|e| Error::ProcessingFailed(format!("cannot store context entry {key}: {e}")))?;
        self.entries.insert(key, value);
        Ok(())
    }

    /// Read an entry back as `T`
    ///
    /// `Ok(None)` when the key is absent; an error when it holds another shape.
    pub fn get_typed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.entries
            .get(key)
            .map(|value| {
                T::deserialize(value).map_err(|e| {
                    Error::ProcessingFailed(format!("context entry {key} has unexpected shape: {e}"))
                })
            })
            .transpose()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entry names in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
