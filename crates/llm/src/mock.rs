//! Scripted mock backend for tests and keyless development

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use concierge_core::{
    GenerateRequest, GenerateResponse, LanguageModel, Result, ToolDefinition,
};

/// In-memory [`LanguageModel`] that replays scripted responses
///
/// Responses are consumed in order; once the script runs out a fixed
/// default reply is returned. Every received request is recorded so
/// tests can assert on call counts and prompt contents.
pub struct MockLlm {
    responses: Mutex<VecDeque<GenerateResponse>>,
    requests: Mutex<Vec<GenerateRequest>>,
    default_text: String,
}

impl MockLlm {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_text: "Entendido, ¿en qué más puedo ayudarte?".to_string(),
        }
    }

    /// Queue a scripted response
    pub fn push_response(&self, response: GenerateResponse) {
        self.responses.lock().push_back(response);
    }

    /// Queue a plain text reply
    pub fn push_text(&self, text: impl Into<String>) {
        self.push_response(GenerateResponse::text(text));
    }

    /// Number of generate calls received
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Copies of every request received so far
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().clone()
    }

    fn next_response(&self, request: GenerateRequest) -> GenerateResponse {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| GenerateResponse::text(self.default_text.clone()))
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for MockLlm {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        Ok(self.next_response(request))
    }

    async fn generate_with_tools(
        &self,
        request: GenerateRequest,
        _tools: &[ToolDefinition],
    ) -> Result<GenerateResponse> {
        Ok(self.next_response(request))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_scripted_responses_in_order() {
        let mock = MockLlm::new();
        mock.push_text("primera");
        mock.push_text("segunda");

        let request = GenerateRequest::new("sys").with_user_message("hola");
        assert_eq!(mock.generate(request.clone()).await.unwrap().text, "primera");
        assert_eq!(mock.generate(request.clone()).await.unwrap().text, "segunda");
        // Script exhausted, default reply
        assert!(!mock.generate(request).await.unwrap().text.is_empty());
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn records_requests() {
        let mock = MockLlm::new();
        let request = GenerateRequest::new("sys").with_user_message("busco casa");
        mock.generate(request).await.unwrap();

        let seen = mock.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].messages[1].content, "busco casa");
    }
}
