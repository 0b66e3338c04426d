//! Language model trait

use async_trait::async_trait;

use crate::error::Result;
use crate::llm_types::{GenerateRequest, GenerateResponse, ToolDefinition};

/// Language model abstraction
///
/// Object-safe so the agent can hold `Arc<dyn LanguageModel>` and swap
/// backends (hosted API, mock) without touching orchestration code.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for the given request
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Generate with tool/function definitions the model may call
    async fn generate_with_tools(
        &self,
        request: GenerateRequest,
        tools: &[ToolDefinition],
    ) -> Result<GenerateResponse>;

    /// Whether the backend is reachable and configured
    async fn is_available(&self) -> bool;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}
