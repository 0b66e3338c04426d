//! Core traits and types for the property concierge
//!
//! This crate provides foundational types used across all other crates:
//! - Catalog types (properties, filter sets, ranked results)
//! - Conversation types (turns, roles)
//! - LLM request/response types
//! - Core traits for pluggable backends (LLM, catalog, conversation store)
//! - Error types

pub mod conversation;
pub mod error;
pub mod filters;
pub mod llm_types;
pub mod property;
pub mod traits;

pub use conversation::{Turn, TurnRole};
pub use error::{Error, Result};
pub use filters::FilterSet;
pub use llm_types::{
    FinishReason, GenerateRequest, GenerateResponse, Message, Role, TokenUsage, ToolCall,
    ToolDefinition, ToolInvocation,
};
pub use property::{Property, PropertyType, RankedProperty};

pub use traits::{ConversationStore, LanguageModel, PropertySource};
