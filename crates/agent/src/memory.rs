//! Conversation memory
//!
//! Per-user memory built on top of a [`ConversationStore`]. Besides the
//! raw turn history it tracks structured state the agent accumulates
//! over a conversation: sticky search preferences, which listings were
//! already shown, and coarse engagement counters.
//!
//! Histories are kept bounded: every `summary_interval` exchanges the
//! older turns are folded into a single system summary produced by the
//! LLM, keeping the last `max_history` turns verbatim. When the
//! summarization call fails the history is truncated instead so a flaky
//! backend can never let memory grow without bound.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use concierge_config::MemoryConfig;
use concierge_core::{
    ConversationStore, Error, FilterSet, GenerateRequest, LanguageModel, Result, Turn,
};

const SUMMARY_SYSTEM_PROMPT: &str = "Eres un asistente que resume conversaciones entre un \
    cliente y una asesora inmobiliaria. Resume la conversación en pocas frases, conservando \
    las preferencias del cliente, las propiedades mencionadas y cualquier acuerdo pendiente. \
    Responde únicamente con el resumen, en español.";

const SUMMARY_PREFIX: &str = "Resumen de la conversación anterior";

/// Engagement counters for one conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    /// Completed user/assistant exchanges
    pub message_count: u64,
    /// Property searches performed on the user's behalf
    pub search_count: u64,
    /// Property links the user followed
    pub property_clicks: u64,
    /// Explicit interest signals (visit requests, agent handoffs)
    pub interest_indicators: u64,
}

/// A listing already surfaced to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShownProperty {
    /// Catalog id
    pub id: String,
    /// Where it came up (tool name, listing title)
    pub context: String,
    /// First time it was shown
    pub shown_at: DateTime<Utc>,
}

#[derive(Default)]
struct Profile {
    preferences: FilterSet,
    shown: Vec<ShownProperty>,
    metrics: EngagementMetrics,
}

/// Structured per-conversation memory with bounded turn history
pub struct ConversationMemory {
    store: Arc<dyn ConversationStore>,
    llm: Arc<dyn LanguageModel>,
    profiles: DashMap<String, Profile>,
    config: MemoryConfig,
}

impl ConversationMemory {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        llm: Arc<dyn LanguageModel>,
        config: MemoryConfig,
    ) -> Self {
        Self {
            store,
            llm,
            profiles: DashMap::new(),
            config,
        }
    }

    /// Record one completed exchange
    ///
    /// Summarization runs as a side effect every `summary_interval`
    /// exchanges, after the new turns are stored.
    pub async fn record_turn(&self, conversation_id: &str, input: &str, output: &str) -> Result<()> {
        self.store.append_turn(conversation_id, Turn::user(input))?;
        self.store
            .append_turn(conversation_id, Turn::assistant(output))?;

        let exchanges = {
            let mut profile = self.profiles.entry(conversation_id.to_string()).or_default();
            profile.metrics.message_count += 1;
            profile.metrics.message_count
        };

        if exchanges % self.config.summary_interval as u64 == 0 {
            self.compact_history(conversation_id).await?;
        }
        Ok(())
    }

    /// Full turn history, oldest first
    pub fn load_history(&self, conversation_id: &str) -> Result<Vec<Turn>> {
        self.store.turns(conversation_id)
    }

    /// Merge newly extracted preferences, last write wins per key
    pub fn update_preferences(&self, conversation_id: &str, partial: &FilterSet) {
        let mut profile = self.profiles.entry(conversation_id.to_string()).or_default();
        profile.preferences.merge(partial);
        match serde_json::to_string(&profile.preferences) {
            Ok(json) => info!(conversation = conversation_id, preferences = %json, "updated user preferences"),
            Err(_) => info!(conversation = conversation_id, "updated user preferences"),
        }
    }

    /// Current accumulated preferences
    pub fn preferences(&self, conversation_id: &str) -> FilterSet {
        self.profiles
            .get(conversation_id)
            .map(|p| p.preferences.clone())
            .unwrap_or_default()
    }

    /// Count a search performed for this user
    pub fn log_search(&self, conversation_id: &str, query: &str) {
        let mut profile = self.profiles.entry(conversation_id.to_string()).or_default();
        profile.metrics.search_count += 1;
        info!(conversation = conversation_id, query, "search performed");
    }

    /// Count a property link the user followed
    pub fn log_property_click(&self, conversation_id: &str, property_id: &str) {
        let mut profile = self.profiles.entry(conversation_id.to_string()).or_default();
        profile.metrics.property_clicks += 1;
        info!(conversation = conversation_id, property_id, "property link clicked");
    }

    /// Count an explicit interest signal, e.g. a visit request
    pub fn log_interest_indicator(&self, conversation_id: &str) {
        let mut profile = self.profiles.entry(conversation_id.to_string()).or_default();
        profile.metrics.interest_indicators += 1;
    }

    /// Remember a listing as shown, idempotent by property id
    pub fn add_shown_property(&self, conversation_id: &str, property_id: &str, context: &str) {
        let mut profile = self.profiles.entry(conversation_id.to_string()).or_default();
        if profile.shown.iter().any(|p| p.id == property_id) {
            return;
        }
        profile.shown.push(ShownProperty {
            id: property_id.to_string(),
            context: context.to_string(),
            shown_at: Utc::now(),
        });
        info!(conversation = conversation_id, property_id, "property added to history");
    }

    /// Listings already surfaced, in the order they first appeared
    pub fn shown_properties(&self, conversation_id: &str) -> Vec<ShownProperty> {
        self.profiles
            .get(conversation_id)
            .map(|p| p.shown.clone())
            .unwrap_or_default()
    }

    /// Snapshot of the engagement counters
    pub fn metrics(&self, conversation_id: &str) -> EngagementMetrics {
        self.profiles
            .get(conversation_id)
            .map(|p| p.metrics.clone())
            .unwrap_or_default()
    }

    /// Forget everything about the conversation
    pub fn clear(&self, conversation_id: &str) -> Result<()> {
        self.store.clear(conversation_id)?;
        self.profiles.remove(conversation_id);
        Ok(())
    }

    /// Fold turns older than the verbatim window into a summary
    async fn compact_history(&self, conversation_id: &str) -> Result<()> {
        let turns = self.store.turns(conversation_id)?;
        if turns.len() <= self.config.max_history {
            return Ok(());
        }

        let split = turns.len() - self.config.max_history;
        let older = &turns[..split];
        let recent = turns[split..].to_vec();

        match self.summarize(older).await {
            Ok(summary) => {
                let mut kept = Vec::with_capacity(recent.len() + 1);
                kept.push(Turn::system(format!("{SUMMARY_PREFIX}: {summary}")));
                kept.extend(recent);
                self.store.replace_turns(conversation_id, kept)?;
                info!(
                    conversation = conversation_id,
                    summarized = older.len(),
                    "folded older turns into summary"
                );
            }
            Err(e) => {
                warn!(
                    conversation = conversation_id,
                    error = %e,
                    "summarization failed, truncating history"
                );
                self.truncate_history(conversation_id, recent)?;
            }
        }
        Ok(())
    }

    /// Fallback when summarization fails: drop the older turns outright
    fn truncate_history(&self, conversation_id: &str, recent: Vec<Turn>) -> Result<()> {
        self.store.replace_turns(conversation_id, recent)
    }

    async fn summarize(&self, older: &[Turn]) -> Result<String> {
        let mut transcript = String::new();
        for turn in older {
            // An earlier summary is folded back in as plain text
            transcript.push_str(turn.role.as_str());
            transcript.push_str(": ");
            transcript.push_str(&turn.content);
            transcript.push('\n');
        }

        let request = GenerateRequest::new(SUMMARY_SYSTEM_PROMPT)
            .with_user_message(transcript)
            .with_max_tokens(self.config.summary_max_tokens)
            .with_temperature(0.0);

        let response = self.llm.generate(request).await?;
        let summary = response.text.trim().to_string();
        if summary.is_empty() {
            return Err(Error::Memory("summarization returned empty text".into()));
        }
        Ok(summary)
    }
}
