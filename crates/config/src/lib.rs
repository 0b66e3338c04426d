//! Configuration management for the concierge
//!
//! Supports loading configuration from:
//! - YAML files (config/default.yaml, config/{env}.yaml)
//! - Environment variables (CONCIERGE_ prefix)
//!
//! Spanish-language vocabulary (neighborhood gazetteer, amenity terms,
//! greeting keywords) lives in its own YAML file so the agent can be
//! pointed at a different city without recompiling.

pub mod settings;
pub mod vocabulary;

pub use settings::{
    load_settings, AgentConfig, CatalogConfig, LlmConfig, MemoryConfig, ObservabilityConfig,
    RuntimeEnvironment, ServerConfig, Settings,
};
pub use vocabulary::Vocabulary;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}: {1}")]
    FileNotFound(String, String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
