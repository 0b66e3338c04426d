//! Search pipeline composition
//!
//! Glues extraction, filtering and ranking over a property source.
//! The catalog is re-read on every search; it is small and the source
//! decides how to satisfy the read.

use std::sync::Arc;

use tracing::info;

use concierge_core::{FilterSet, Property, PropertySource, Result};

use crate::extractor::CriteriaExtractor;
use crate::filter::apply_filters;
use crate::ranker::rank_properties;

/// Result of one search invocation
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Filters extracted from the query
    pub filters: FilterSet,
    /// Matches before the result cap was applied
    pub total_matches: usize,
    /// Ranked, capped results
    pub properties: Vec<Property>,
}

/// Extract, filter, rank, cap
pub struct SearchPipeline {
    source: Arc<dyn PropertySource>,
    extractor: CriteriaExtractor,
    default_limit: usize,
}

impl SearchPipeline {
    pub fn new(
        source: Arc<dyn PropertySource>,
        extractor: CriteriaExtractor,
        default_limit: usize,
    ) -> Self {
        Self {
            source,
            extractor,
            default_limit,
        }
    }

    pub fn extractor(&self) -> &CriteriaExtractor {
        &self.extractor
    }

    /// Run a search over the catalog
    pub async fn search(&self, query: &str, max_results: Option<usize>) -> Result<SearchOutcome> {
        let limit = max_results.unwrap_or(self.default_limit).max(1);

        let catalog = self.source.all_properties().await?;
        let filters = self.extractor.extract(query);
        let filtered = apply_filters(&catalog, &filters);
        let total_matches = filtered.len();
        let mut ranked = rank_properties(filtered, query);
        ranked.truncate(limit);

        info!(
            query,
            catalog = catalog.len(),
            total_matches,
            returned = ranked.len(),
            "property search"
        );

        Ok(SearchOutcome {
            filters,
            total_matches,
            properties: ranked,
        })
    }
}
