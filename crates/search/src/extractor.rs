//! Criteria extraction from free-form Spanish queries
//!
//! Pure pattern matching, case-insensitive. A query that mentions
//! nothing recognizable yields an empty filter set, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use concierge_config::Vocabulary;
use concierge_core::{FilterSet, PropertyType};

// Price amounts are quoted in "millones"; range first, then explicit
// ceiling/floor words, then a bare amount.
static PRICE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"entre\s*(\d+[\d.,]*)\s*y\s*(\d+[\d.,]*)\s*(?:millones|millon|m)").unwrap()
});
static PRICE_CEILING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:hasta|máximo|maximo)\s*(?:de\s*)?(\d+[\d.,]*)\s*(?:millones|millon|m)")
        .unwrap()
});
static PRICE_FLOOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:desde|mínimo|minimo)\s*(?:de\s*)?(\d+[\d.,]*)\s*(?:millones|millon|m)")
        .unwrap()
});
static PRICE_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+[\d.,]*)\s*(?:millones|millon|m)(?:\s*de pesos)?\b").unwrap());

static BEDROOMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*(?:habitaciones|habitación|habitacion|hab|cuartos|recámaras|recamaras)")
        .unwrap()
});
static BATHROOMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:baños|baño|banos|bano)").unwrap());
static AREA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:m2|m²|metros cuadrados|metros)").unwrap());

static APARTMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:apartamento|apartamentos|apto)\b").unwrap());
static HOUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:casa|casas)\b").unwrap());

/// Structured criteria extraction over a configured vocabulary
#[derive(Debug, Clone, Default)]
pub struct CriteriaExtractor {
    vocabulary: Vocabulary,
}

impl CriteriaExtractor {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Extract a filter set from a query
    pub fn extract(&self, query: &str) -> FilterSet {
        let normalized = query.to_lowercase();
        let mut filters = FilterSet::default();

        self.extract_price(&normalized, &mut filters);

        if let Some(n) = first_int(&BEDROOMS, &normalized) {
            filters.min_bedrooms = Some(n);
        }
        if let Some(n) = first_int(&BATHROOMS, &normalized) {
            filters.min_bathrooms = Some(n);
        }
        if let Some(n) = first_int(&AREA, &normalized) {
            filters.min_area = Some(n);
        }

        // Apartment checked before house
        if APARTMENT.is_match(&normalized) {
            filters.property_type = Some(PropertyType::Apartamento);
        } else if HOUSE.is_match(&normalized) {
            filters.property_type = Some(PropertyType::Casa);
        }

        let neighborhoods = self.vocabulary.find_neighborhoods(&normalized);
        if !neighborhoods.is_empty() {
            filters.neighborhoods = Some(neighborhoods);
        }

        let amenities = self.vocabulary.find_amenities(&normalized);
        if !amenities.is_empty() {
            filters.amenities = Some(amenities);
        }

        debug!(?filters, query, "extracted filters");
        filters
    }

    fn extract_price(&self, normalized: &str, filters: &mut FilterSet) {
        if let Some(caps) = PRICE_RANGE.captures(normalized) {
            filters.min_price = parse_millions(&caps[1]);
            filters.max_price = parse_millions(&caps[2]);
            return;
        }

        if let Some(caps) = PRICE_CEILING.captures(normalized) {
            filters.max_price = parse_millions(&caps[1]);
            return;
        }

        if let Some(caps) = PRICE_FLOOR.captures(normalized) {
            filters.min_price = parse_millions(&caps[1]);
            return;
        }

        // A bare amount is read as a ceiling. Guessed heuristic carried
        // over from production behavior; can produce false ceilings on
        // queries like "tengo 500 millones". Do not change without
        // product input.
        if filters.max_price.is_none() {
            if let Some(caps) = PRICE_BARE.captures(normalized) {
                filters.max_price = parse_millions(&caps[1]);
            }
        }
    }
}

/// Parse a "millones" quantity into pesos, stripping thousands
/// separators first
fn parse_millions(raw: &str) -> Option<u64> {
    let cleaned = raw.replace(['.', ','], "");
    cleaned.parse::<f64>().ok().map(|n| (n * 1_000_000.0) as u64)
}

fn first_int(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|caps| caps[1].parse().ok())
}
