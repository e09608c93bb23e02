//! In-process conversation memory

use agent_llm::{Message, Role};

/// Ordered record of the user/assistant turns of one agent
///
/// Only final text turns are kept; tool traffic from inside a turn is not.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    turns: Vec<Message>,
}

impl ConversationMemory {
    /// Create an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed exchange
    pub fn record_exchange(&mut self, input: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(Message::user(input));
        self.turns.push(Message::assistant(answer));
    }

    /// All turns, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.turns
    }

    /// `(role, text)` view of the turns
    pub fn transcript(&self) -> Vec<(Role, String)> {
        self.turns
            .iter()
            .map(|m| (m.role, m.text().unwrap_or_default().to_string()))
            .collect()
    }

    /// Number of stored turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
