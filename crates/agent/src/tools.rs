//! Agent tools
//!
//! Tools the model may call through function calling. Each tool carries
//! its own JSON schema and returns WhatsApp-ready Spanish text, so the
//! model can relay tool output verbatim when it chooses to.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use concierge_core::{Error, Result, ToolDefinition};
use concierge_search::SearchPipeline;
use concierge_templates::{format_no_results_message, format_property_list};

/// Name the model uses to invoke the property search
pub const SEARCH_TOOL_NAME: &str = "search_properties";

/// Window of ranked matches fetched per search. Wider than the display
/// cap so the list formatter can report how many more listings matched.
const FETCH_WINDOW: usize = 25;

/// A callable tool exposed to the model
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model calls the tool by
    fn name(&self) -> &str;

    /// Definition advertised to the model
    fn definition(&self) -> ToolDefinition;

    /// Execute with the model-supplied JSON arguments
    async fn execute(&self, arguments: serde_json::Value) -> Result<String>;
}

/// Registry of tools available to the agent
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions for every registered tool
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, arguments: serde_json::Value) -> Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| Error::Tool(format!("unknown tool: {name}")))?;
        debug!(tool = name, "executing tool");
        tool.execute(arguments).await
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
}

/// Natural-language property search over the catalog
pub struct PropertySearchTool {
    pipeline: SearchPipeline,
    max_results: usize,
}

impl PropertySearchTool {
    pub fn new(pipeline: SearchPipeline, max_results: usize) -> Self {
        Self {
            pipeline,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for PropertySearchTool {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            SEARCH_TOOL_NAME,
            "Busca propiedades en el inventario de LaHaus a partir de una descripción en \
             lenguaje natural. Úsala siempre que el cliente mencione criterios de búsqueda \
             como zona, presupuesto, habitaciones o características.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Criterios de búsqueda tal como los expresó el cliente"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Máximo de propiedades a mostrar"
                    }
                },
                "required": ["query"]
            }),
        )
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<String> {
        let args: SearchArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::Tool(format!("invalid search arguments: {e}")))?;

        let outcome = self.pipeline.search(&args.query, Some(FETCH_WINDOW)).await?;

        if outcome.properties.is_empty() {
            return Ok(format_no_results_message(Some(&outcome.filters)));
        }

        let display_cap = args.max_results.unwrap_or(self.max_results).max(1);
        Ok(format_property_list(&outcome.properties, display_cap))
    }
}
