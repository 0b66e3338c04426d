//! Conversation store trait

use crate::conversation::Turn;
use crate::error::Result;

/// Per-conversation turn storage
///
/// Keyed by an opaque conversation id (the WhatsApp sender number in
/// practice). Implementations must be safe to share across request
/// handlers.
pub trait ConversationStore: Send + Sync {
    /// Append a turn to the conversation, creating it if absent
    fn append_turn(&self, conversation_id: &str, turn: Turn) -> Result<()>;

    /// Full turn list for the conversation, empty if never seen
    fn turns(&self, conversation_id: &str) -> Result<Vec<Turn>>;

    /// Replace the conversation's turns wholesale (used when older
    /// turns are folded into a summary)
    fn replace_turns(&self, conversation_id: &str, turns: Vec<Turn>) -> Result<()>;

    /// Drop the conversation entirely
    fn clear(&self, conversation_id: &str) -> Result<()>;
}
