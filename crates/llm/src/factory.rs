//! Backend construction from configuration

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use concierge_config::LlmConfig;

use crate::mock::MockLlm;
use crate::openai::{OpenAiBackend, OpenAiConfig};
use crate::{LlmError, SharedLlm};

/// Build the configured backend
///
/// An "openai" provider without an API key degrades to the mock so a
/// development instance stays usable; production configs reject that
/// combination at validation time.
pub fn create_backend(config: &LlmConfig) -> Result<SharedLlm, LlmError> {
    match config.provider.as_str() {
        "openai" => match &config.api_key {
            Some(api_key) if !api_key.is_empty() => {
                let backend = OpenAiBackend::new(
                    OpenAiConfig::new(api_key.clone())
                        .with_model(config.model.clone())
                        .with_max_tokens(config.max_tokens)
                        .with_temperature(config.temperature)
                        .with_endpoint(config.api_base.clone())
                        .with_timeout(Duration::from_secs(config.timeout_seconds)),
                )?;
                Ok(Arc::new(backend))
            }
            _ => {
                warn!("no LLM API key configured, falling back to mock backend");
                Ok(Arc::new(MockLlm::new()))
            }
        },
        "mock" => Ok(Arc::new(MockLlm::new())),
        other => Err(LlmError::Configuration(format!(
            "unknown LLM provider: {other}"
        ))),
    }
}
