//! Structured search constraints
//!
//! A [`FilterSet`] is a sparse mapping of optional constraints derived
//! from free text. Absence of a field means "no constraint on that
//! dimension". Filter sets are built fresh per query and also accumulate
//! per conversation as user preferences.

use serde::{Deserialize, Serialize};

use crate::property::PropertyType;

/// Optional search constraints extracted from a natural-language query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Inclusive lower price bound, COP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    /// Inclusive upper price bound, COP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    /// Inclusive lower bedroom bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<u32>,
    /// Inclusive lower bathroom bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_bathrooms: Option<u32>,
    /// Inclusive lower area bound, m²
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<u32>,
    /// Lowercase neighborhood substrings, OR semantics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhoods: Option<Vec<String>>,
    /// Requested property type, matched against the listing title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    /// Lowercase amenity labels, OR semantics (soft filter)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
}

impl FilterSet {
    /// True when no dimension is constrained
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_bedrooms.is_none()
            && self.min_bathrooms.is_none()
            && self.min_area.is_none()
            && self.neighborhoods.is_none()
            && self.property_type.is_none()
            && self.amenities.is_none()
    }

    /// Merge another filter set into this one, last write wins per key
    ///
    /// Used for sticky user preferences: each new extraction overwrites
    /// the keys it carries and leaves the rest untouched.
    pub fn merge(&mut self, other: &FilterSet) {
        if other.min_price.is_some() {
            self.min_price = other.min_price;
        }
        if other.max_price.is_some() {
            self.max_price = other.max_price;
        }
        if other.min_bedrooms.is_some() {
            self.min_bedrooms = other.min_bedrooms;
        }
        if other.min_bathrooms.is_some() {
            self.min_bathrooms = other.min_bathrooms;
        }
        if other.min_area.is_some() {
            self.min_area = other.min_area;
        }
        if other.neighborhoods.is_some() {
            self.neighborhoods = other.neighborhoods.clone();
        }
        if other.property_type.is_some() {
            self.property_type = other.property_type;
        }
        if other.amenities.is_some() {
            self.amenities = other.amenities.clone();
        }
    }
}
