//! Property search pipeline
//!
//! Turns free-form Spanish queries into structured filters, narrows the
//! catalog, and orders survivors by a keyword-overlap relevance score.
//! Deliberately deterministic: pattern matching over a configured
//! vocabulary, not statistical NLU.

pub mod extractor;
pub mod filter;
pub mod pipeline;
pub mod ranker;

pub use extractor::CriteriaExtractor;
pub use filter::apply_filters;
pub use pipeline::{SearchOutcome, SearchPipeline};
pub use ranker::rank_properties;
