//! Core trait definitions

pub mod catalog;
pub mod llm;
pub mod store;

pub use catalog::PropertySource;
pub use llm::LanguageModel;
pub use store::ConversationStore;
