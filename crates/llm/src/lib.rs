//! Language model backends
//!
//! Hosted chat-completion backends behind the [`LanguageModel`] trait,
//! plus a scriptable mock for tests and keyless development.

pub mod factory;
pub mod mock;
pub mod openai;

pub use factory::create_backend;
pub use mock::MockLlm;
pub use openai::{OpenAiBackend, OpenAiConfig};

use concierge_core::traits::LanguageModel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for concierge_core::Error {
    fn from(err: LlmError) -> Self {
        concierge_core::Error::Llm(err.to_string())
    }
}

/// Shorthand for the trait object the rest of the system holds
pub type SharedLlm = std::sync::Arc<dyn LanguageModel>;
