//! Relevance ranking
//!
//! Bag-of-words overlap against the original query plus neighborhood
//! and amenity boosts. A known precision limitation, not semantic
//! search; keep expectations accordingly.

use std::collections::HashSet;

use concierge_core::{Property, RankedProperty};

/// Order properties by descending relevance to the query
///
/// Stable: ties keep input order. Fewer than two properties are
/// returned unchanged without scoring.
pub fn rank_properties(properties: Vec<Property>, query: &str) -> Vec<Property> {
    if properties.len() < 2 {
        return properties;
    }

    let mut scored: Vec<RankedProperty> = properties
        .into_iter()
        .map(|property| {
            let score = score_property(&property, query);
            RankedProperty { property, score }
        })
        .collect();

    // sort_by is stable, so equal scores keep catalog order
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    scored.into_iter().map(|r| r.property).collect()
}

fn score_property(property: &Property, query: &str) -> f64 {
    let normalized = query.to_lowercase();
    let query_words: HashSet<&str> = normalized.split_whitespace().collect();

    if query_words.is_empty() {
        return base_amenity_boost(property);
    }

    let text = property.searchable_text();
    let neighborhood = property.neighborhood.to_lowercase();

    let matching = query_words.iter().filter(|w| text.contains(**w)).count();
    let mut score = matching as f64 / query_words.len() as f64;

    // Exact neighborhood mentions weigh heavily, cumulative per word
    for word in &query_words {
        if neighborhood.contains(*word) {
            score += 0.5;
        }
    }

    score + base_amenity_boost(property)
}

fn base_amenity_boost(property: &Property) -> f64 {
    match &property.amenities {
        Some(amenities) => (amenities.len() as f64 * 0.1).min(0.5),
        None => 0.0,
    }
}
