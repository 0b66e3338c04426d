//! Conversation orchestration
//!
//! [`ConciergeAgent`] drives one WhatsApp exchange end to end: greeting
//! short-circuit, LLM call with tools, tool execution rounds, memory
//! bookkeeping, and a fixed Spanish fallback when anything fails. The
//! caller always gets a sendable reply; errors never escape.

use std::sync::Arc;

use tracing::{error, info, warn};

use concierge_config::{AgentConfig, LlmConfig, Vocabulary};
use concierge_core::{
    GenerateRequest, LanguageModel, Message, PropertySource, Result, ToolInvocation, Turn,
    TurnRole,
};
use concierge_search::CriteriaExtractor;
use concierge_templates::format_welcome_message;

use crate::memory::ConversationMemory;
use crate::prompt;
use crate::tools::{ToolRegistry, SEARCH_TOOL_NAME};

/// Reply sent when a turn fails for any reason
pub const FALLBACK_REPLY: &str = "Lo siento, estoy teniendo problemas para procesar tu \
    solicitud en este momento. ¿Podrías intentarlo de nuevo o reformular tu pregunta?";

/// The conversation handler behind the webhook
pub struct ConciergeAgent {
    llm: Arc<dyn LanguageModel>,
    memory: ConversationMemory,
    tools: ToolRegistry,
    catalog: Arc<dyn PropertySource>,
    extractor: CriteriaExtractor,
    agent_config: AgentConfig,
    llm_config: LlmConfig,
}

impl ConciergeAgent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        memory: ConversationMemory,
        tools: ToolRegistry,
        catalog: Arc<dyn PropertySource>,
        extractor: CriteriaExtractor,
        agent_config: AgentConfig,
        llm_config: LlmConfig,
    ) -> Self {
        Self {
            llm,
            memory,
            tools,
            catalog,
            extractor,
            agent_config,
            llm_config,
        }
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Handle one incoming message and produce a reply
    ///
    /// Never returns an error: failures are logged and replaced with a
    /// fixed apologetic reply so the user always hears back.
    pub async fn handle(&self, user_id: &str, text: &str) -> String {
        match self.handle_inner(user_id, text).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(user = user_id, error = %e, "agent turn failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn handle_inner(&self, user_id: &str, text: &str) -> Result<String> {
        let history = self.memory.load_history(user_id)?;

        // Greetings and very short openers get the canned welcome, no
        // LLM round trip.
        if history.is_empty() && opening_greeting(self.extractor.vocabulary(), text) {
            let reply =
                format_welcome_message(&self.agent_config.name, &self.agent_config.company);
            self.memory.record_turn(user_id, text, &reply).await?;
            return Ok(reply);
        }

        let mut request = self.base_request(&history, text);
        let definitions = self.tools.definitions();

        let mut invocations: Vec<ToolInvocation> = Vec::new();
        let mut response = self
            .llm
            .generate_with_tools(request.clone(), &definitions)
            .await?;

        let mut rounds = 0;
        while response.has_tool_calls() && rounds < self.agent_config.max_tool_rounds {
            rounds += 1;
            let calls = response.tool_calls.clone();
            request = request.with_message(Message::assistant_tool_calls(calls.clone()));

            for call in calls {
                let output = match self.tools.execute(&call.name, call.arguments.clone()).await {
                    Ok(output) => output,
                    Err(e) => {
                        warn!(tool = %call.name, error = %e, "tool call failed");
                        format!("Error al ejecutar la herramienta: {e}")
                    }
                };
                invocations.push(ToolInvocation {
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                    output: output.clone(),
                });
                request = request.with_message(Message::tool(output, &call.id));
            }

            response = self
                .llm
                .generate_with_tools(request.clone(), &definitions)
                .await?;
        }

        // A model that stops on a tool round without text still owes the
        // user an answer; relay the last tool output.
        let reply = if response.text.trim().is_empty() {
            invocations
                .last()
                .map(|i| i.output.clone())
                .unwrap_or_else(|| FALLBACK_REPLY.to_string())
        } else {
            response.text.clone()
        };

        self.update_memory(user_id, text, &history, &invocations)
            .await?;
        self.memory.record_turn(user_id, text, &reply).await?;

        info!(user = user_id, input = text, output = %reply, "conversation exchange");
        Ok(reply)
    }

    fn base_request(&self, history: &[Turn], text: &str) -> GenerateRequest {
        let mut request = GenerateRequest::new(prompt::system_prompt(&self.agent_config))
            .with_max_tokens(self.llm_config.max_tokens)
            .with_temperature(self.llm_config.temperature);

        for turn in history {
            request = match turn.role {
                TurnRole::User => request.with_user_message(&turn.content),
                TurnRole::Assistant => request.with_assistant_message(&turn.content),
                TurnRole::System => request.with_message(Message::system(&turn.content)),
            };
        }
        request.with_user_message(text)
    }

    /// Post-turn bookkeeping: sticky preferences, search counters and
    /// which listings the user has now seen.
    async fn update_memory(
        &self,
        user_id: &str,
        text: &str,
        history: &[Turn],
        invocations: &[ToolInvocation],
    ) -> Result<()> {
        // Preferences are re-extracted over everything the user has said
        // so far; a criterion mentioned three turns ago still counts.
        let mut corpus: String = history
            .iter()
            .filter(|t| t.role == TurnRole::User)
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        corpus.push(' ');
        corpus.push_str(text);

        let extracted = self.extractor.extract(&corpus);
        if !extracted.is_empty() {
            self.memory.update_preferences(user_id, &extracted);
        }

        let searches: Vec<&ToolInvocation> = invocations
            .iter()
            .filter(|i| i.name == SEARCH_TOOL_NAME)
            .collect();
        if searches.is_empty() {
            return Ok(());
        }

        let catalog = self.catalog.all_properties().await?;
        for invocation in searches {
            if let Some(query) = invocation.arguments.get("query").and_then(|v| v.as_str()) {
                self.memory.log_search(user_id, query);
            }

            // Map listings back to catalog ids by URL; fall back to the
            // URL tail since cards may shorten links.
            for property in &catalog {
                let tail = property.url.rsplit('/').next().unwrap_or(&property.url);
                if invocation.output.contains(&property.url)
                    || (!tail.is_empty() && invocation.output.contains(tail))
                {
                    self.memory
                        .add_shown_property(user_id, &property.id, &property.title);
                }
            }
        }
        Ok(())
    }
}

/// First-turn welcome heuristic: under three words, or any configured
/// greeting keyword.
fn opening_greeting(vocabulary: &Vocabulary, text: &str) -> bool {
    text.split_whitespace().count() < 3 || vocabulary.is_greeting(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::tools::PropertySearchTool;
    use concierge_catalog::sample_properties;
    use concierge_config::MemoryConfig;
    use concierge_core::{Error, GenerateResponse, FinishReason, Property, ToolCall, ToolDefinition};
    use concierge_llm::MockLlm;
    use concierge_search::SearchPipeline;

    struct FixedSource(Vec<Property>);

    #[async_trait::async_trait]
    impl PropertySource for FixedSource {
        async fn all_properties(&self) -> Result<Vec<Property>> {
            Ok(self.0.clone())
        }

        async fn property_by_id(&self, id: &str) -> Result<Option<Property>> {
            Ok(self.0.iter().find(|p| p.id == id).cloned())
        }
    }

    struct FailingLlm;

    #[async_trait::async_trait]
    impl LanguageModel for FailingLlm {
        async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
            Err(Error::Llm("backend down".into()))
        }

        async fn generate_with_tools(
            &self,
            _request: GenerateRequest,
            _tools: &[ToolDefinition],
        ) -> Result<GenerateResponse> {
            Err(Error::Llm("backend down".into()))
        }

        async fn is_available(&self) -> bool {
            false
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    fn agent_with(llm: Arc<dyn LanguageModel>) -> ConciergeAgent {
        let catalog: Arc<dyn PropertySource> = Arc::new(FixedSource(sample_properties()));
        let agent_config = AgentConfig::default();
        let pipeline = SearchPipeline::new(
            catalog.clone(),
            CriteriaExtractor::new(Vocabulary::default()),
            agent_config.max_results,
        );
        let mut tools = ToolRegistry::new();
        tools.register(PropertySearchTool::new(pipeline, agent_config.max_results));

        ConciergeAgent::new(
            llm.clone(),
            ConversationMemory::new(Arc::new(InMemoryStore::new()), llm, MemoryConfig::default()),
            tools,
            catalog,
            CriteriaExtractor::new(Vocabulary::default()),
            agent_config,
            LlmConfig::default(),
        )
    }

    fn search_call(query: &str) -> GenerateResponse {
        GenerateResponse {
            text: String::new(),
            finish_reason: FinishReason::ToolCalls,
            usage: None,
            tool_calls: vec![ToolCall {
                id: "call_1".to_string(),
                name: SEARCH_TOOL_NAME.to_string(),
                arguments: serde_json::json!({ "query": query }),
            }],
        }
    }

    #[tokio::test]
    async fn greeting_on_first_turn_skips_the_llm() {
        let mock = Arc::new(MockLlm::new());
        let agent = agent_with(mock.clone());

        let reply = agent.handle("wa:1", "hola").await;

        assert!(reply.contains("Karol"));
        assert_eq!(mock.call_count(), 0);
        assert_eq!(agent.memory().load_history("wa:1").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn greeting_keyword_beats_word_count() {
        let mock = Arc::new(MockLlm::new());
        let agent = agent_with(mock.clone());

        let reply = agent.handle("wa:1", "buenos días cómo estás hoy").await;

        assert!(reply.contains("Karol"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn second_turn_goes_to_the_llm_even_if_short() {
        let mock = Arc::new(MockLlm::new());
        mock.push_text("¡Con gusto! Cuéntame qué buscas.");
        let agent = agent_with(mock.clone());

        agent.handle("wa:1", "hola").await;
        let reply = agent.handle("wa:1", "gracias").await;

        assert_eq!(reply, "¡Con gusto! Cuéntame qué buscas.");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn tool_round_runs_search_and_updates_memory() {
        let mock = Arc::new(MockLlm::new());
        mock.push_response(search_call("apartamento en chapinero con 2 habitaciones"));
        mock.push_text("Te comparto estas opciones en Chapinero.");
        let agent = agent_with(mock.clone());

        let reply = agent
            .handle("wa:1", "busco apartamento en chapinero con 2 habitaciones")
            .await;

        assert_eq!(reply, "Te comparto estas opciones en Chapinero.");
        assert_eq!(mock.call_count(), 2);

        let metrics = agent.memory().metrics("wa:1");
        assert_eq!(metrics.search_count, 1);

        let shown = agent.memory().shown_properties("wa:1");
        assert!(shown.iter().any(|p| p.id == "prop1"));

        let prefs = agent.memory().preferences("wa:1");
        assert_eq!(prefs.min_bedrooms, Some(2));
        assert_eq!(
            prefs.neighborhoods.as_deref(),
            Some(&["chapinero".to_string()][..])
        );
    }

    #[tokio::test]
    async fn empty_final_text_relays_last_tool_output() {
        let mock = Arc::new(MockLlm::new());
        mock.push_response(search_call("apartamento en chapinero"));
        mock.push_response(GenerateResponse::text(""));
        let agent = agent_with(mock.clone());

        let reply = agent.handle("wa:1", "quiero ver apartamentos en chapinero").await;

        assert!(reply.contains("Apartamento en Chapinero"));
    }

    #[tokio::test]
    async fn tool_rounds_are_bounded() {
        let mock = Arc::new(MockLlm::new());
        // keeps asking for the tool; the loop must stop at max_tool_rounds
        for _ in 0..10 {
            mock.push_response(search_call("apartamento"));
        }
        let agent = agent_with(mock.clone());

        let _ = agent.handle("wa:1", "muéstrame apartamentos por favor").await;

        let max_rounds = AgentConfig::default().max_tool_rounds;
        assert_eq!(mock.call_count(), max_rounds + 1);
    }

    #[tokio::test]
    async fn llm_failure_yields_apologetic_fallback() {
        let agent = agent_with(Arc::new(FailingLlm));

        let reply = agent
            .handle("wa:1", "busco apartamento en chapinero con terraza")
            .await;

        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn preferences_accumulate_across_turns() {
        let mock = Arc::new(MockLlm::new());
        mock.push_text("Claro, ¿en qué zona?");
        mock.push_text("Perfecto, busco opciones.");
        let agent = agent_with(mock.clone());

        agent
            .handle("wa:1", "busco apartamento de máximo 500 millones")
            .await;
        agent.handle("wa:1", "que quede en chapinero").await;

        let prefs = agent.memory().preferences("wa:1");
        assert_eq!(prefs.max_price, Some(500_000_000));
        assert_eq!(
            prefs.neighborhoods.as_deref(),
            Some(&["chapinero".to_string()][..])
        );
    }
}
