//! In-memory chat history cache entry.
//!
//! A `ChatHistory` is the per-chat ordered turn sequence submitted to the
//! completion backend. It is derived state: rebuildable from persistence
//! at any time, discarded on restart. The first turn is always the fixed
//! system instruction.

use parlance_types::llm::Turn;

/// Ordered turn sequence for one chat, always prefixed by a system turn.
///
/// Appending is O(1) and never re-evaluates the compaction threshold;
/// compaction decisions happen only when the entry is (re)built by the
/// window builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatHistory {
    turns: Vec<Turn>,
}

impl ChatHistory {
    /// Create a history containing only the system instruction turn.
    pub fn new(system_message: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_message)],
        }
    }

    /// The full turn sequence, system turn first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns, including the system turn.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the history holds only the system turn.
    pub fn is_empty(&self) -> bool {
        self.turns.len() <= 1
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Append an already-constructed turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}
