//! In-memory conversation store
//!
//! Default [`ConversationStore`] backing. Conversations are keyed by the
//! WhatsApp sender number and live for the lifetime of the process; a
//! database-backed store can be dropped in behind the same trait.

use dashmap::DashMap;

use concierge_core::{ConversationStore, Result, Turn};

/// Process-local conversation storage
#[derive(Default)]
pub struct InMemoryStore {
    conversations: DashMap<String, Vec<Turn>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conversations currently held
    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    /// Total turns across all conversations
    pub fn total_turns(&self) -> usize {
        self.conversations.iter().map(|e| e.value().len()).sum()
    }
}

impl ConversationStore for InMemoryStore {
    fn append_turn(&self, conversation_id: &str, turn: Turn) -> Result<()> {
        self.conversations
            .entry(conversation_id.to_string())
            .or_default()
            .push(turn);
        Ok(())
    }

    fn turns(&self, conversation_id: &str) -> Result<Vec<Turn>> {
        Ok(self
            .conversations
            .get(conversation_id)
            .map(|e| e.value().clone())
            .unwrap_or_default())
    }

    fn replace_turns(&self, conversation_id: &str, turns: Vec<Turn>) -> Result<()> {
        self.conversations.insert(conversation_id.to_string(), turns);
        Ok(())
    }

    fn clear(&self, conversation_id: &str) -> Result<()> {
        self.conversations.remove(conversation_id);
        Ok(())
    }
}
