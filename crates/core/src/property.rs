//! Catalog record types
//!
//! A [`Property`] is a read-only catalog record. The catalog is loaded
//! fresh for every search invocation, so there is no caching or
//! staleness handling at this layer.

use serde::{Deserialize, Serialize};

/// A single catalog record
///
/// Prices are in Colombian pesos (no minor units). Area is in square
/// meters. Records are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier within the catalog
    pub id: String,
    /// Listing title, e.g. "Apartamento en Chapinero"
    pub title: String,
    /// Price in COP
    pub price: u64,
    /// Bedroom count
    pub bedrooms: u32,
    /// Bathroom count
    pub bathrooms: u32,
    /// Area in m²
    pub area: u32,
    /// Neighborhood or zone name
    pub neighborhood: String,
    /// Free-text listing description
    pub description: String,
    /// Canonical listing URL
    pub url: String,
    /// Amenity labels, if the listing carries any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    /// Year of construction, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_year: Option<u32>,
    /// Socioeconomic stratum (1-6), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stratum: Option<u8>,
}

impl Property {
    /// All searchable text of the record, lowercased
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.neighborhood, self.description).to_lowercase()
    }

    /// Amenity labels, empty slice when the listing has none
    pub fn amenity_labels(&self) -> &[String] {
        self.amenities.as_deref().unwrap_or(&[])
    }
}

/// Property type recognized by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartamento,
    Casa,
}

impl PropertyType {
    /// Lowercase Spanish label, used for title substring matching
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartamento => "apartamento",
            PropertyType::Casa => "casa",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A property paired with a transient relevance score
///
/// The score exists only between ranking and formatting; it is not part
/// of the property's identity and is never persisted.
#[derive(Debug, Clone)]
pub struct RankedProperty {
    pub property: Property,
    pub score: f64,
}
