//! Conversation agent for the property concierge
//!
//! Ties the LLM, the search tool and per-user memory together into the
//! handler the webhook calls.

pub mod memory;
pub mod orchestrator;
pub mod prompt;
pub mod store;
pub mod tools;

pub use memory::{ConversationMemory, EngagementMetrics, ShownProperty};
pub use orchestrator::{ConciergeAgent, FALLBACK_REPLY};
pub use store::InMemoryStore;
pub use tools::{PropertySearchTool, Tool, ToolRegistry, SEARCH_TOOL_NAME};
