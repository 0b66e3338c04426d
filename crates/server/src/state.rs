//! Shared application state

use std::sync::Arc;

use tracing::info;

use concierge_agent::{
    ConciergeAgent, ConversationMemory, InMemoryStore, PropertySearchTool, ToolRegistry,
};
use concierge_catalog::FileCatalog;
use concierge_config::{Settings, Vocabulary};
use concierge_core::{ConversationStore, Error, PropertySource, Result};
use concierge_llm::create_backend;
use concierge_search::{CriteriaExtractor, SearchPipeline};

/// Everything the request handlers need, cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ConciergeAgent>,
    pub store: Arc<InMemoryStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the full agent stack from settings
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let vocabulary = match &settings.vocabulary_path {
            Some(path) => Vocabulary::load(path).map_err(|e| Error::Config(e.to_string()))?,
            None => Vocabulary::default(),
        };

        let llm = create_backend(&settings.llm)?;
        info!(model = llm.model_name(), "language model backend ready");

        let catalog: Arc<dyn PropertySource> =
            Arc::new(FileCatalog::new(&settings.catalog.data_path));

        let store = Arc::new(InMemoryStore::new());
        let memory = ConversationMemory::new(
            store.clone() as Arc<dyn ConversationStore>,
            llm.clone(),
            settings.memory.clone(),
        );

        let pipeline = SearchPipeline::new(
            catalog.clone(),
            CriteriaExtractor::new(vocabulary.clone()),
            settings.agent.max_results,
        );
        let mut tools = ToolRegistry::new();
        tools.register(PropertySearchTool::new(pipeline, settings.agent.max_results));

        let agent = ConciergeAgent::new(
            llm,
            memory,
            tools,
            catalog,
            CriteriaExtractor::new(vocabulary),
            settings.agent.clone(),
            settings.llm.clone(),
        );

        Ok(Self {
            agent: Arc::new(agent),
            store,
            settings: Arc::new(settings),
        })
    }
}
