//! Error types shared across the workspace

/// Result alias using the workspace error type
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for the concierge
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration problem (missing credentials, invalid values)
    #[error("configuration error: {0}")]
    Config(String),

    /// Language model backend failure
    #[error("llm error: {0}")]
    Llm(String),

    /// Catalog read failure
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Tool execution failure
    #[error("tool error: {0}")]
    Tool(String),

    /// Conversation memory failure
    #[error("memory error: {0}")]
    Memory(String),

    /// JSON (de)serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an LLM error from any displayable cause
    pub fn llm(cause: impl std::fmt::Display) -> Self {
        Error::Llm(cause.to_string())
    }

    /// Shorthand for a catalog error from any displayable cause
    pub fn catalog(cause: impl std::fmt::Display) -> Self {
        Error::Catalog(cause.to_string())
    }
}
