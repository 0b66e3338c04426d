//! Catalog narrowing
//!
//! Each present filter key narrows the working set independently, in a
//! fixed order, preserving input order among survivors.

use tracing::debug;

use concierge_core::{FilterSet, Property};

/// Apply a filter set to the catalog
///
/// Amenities are a soft filter: when no candidate has a matching
/// amenity the dimension is skipped entirely instead of zeroing out
/// the result. This deliberately conflates "no property has it" with
/// "ignore this filter"; preserved as documented behavior.
pub fn apply_filters(properties: &[Property], filters: &FilterSet) -> Vec<Property> {
    let mut filtered: Vec<Property> = properties.to_vec();

    if let Some(min_price) = filters.min_price {
        filtered.retain(|p| p.price >= min_price);
    }
    if let Some(max_price) = filters.max_price {
        filtered.retain(|p| p.price <= max_price);
    }

    if let Some(min_bedrooms) = filters.min_bedrooms {
        filtered.retain(|p| p.bedrooms >= min_bedrooms);
    }
    if let Some(min_bathrooms) = filters.min_bathrooms {
        filtered.retain(|p| p.bathrooms >= min_bathrooms);
    }
    if let Some(min_area) = filters.min_area {
        filtered.retain(|p| p.area >= min_area);
    }

    if let Some(neighborhoods) = &filters.neighborhoods {
        filtered.retain(|p| {
            let property_neighborhood = p.neighborhood.to_lowercase();
            neighborhoods
                .iter()
                .any(|n| property_neighborhood.contains(&n.to_lowercase()))
        });
    }

    if let Some(property_type) = filters.property_type {
        let needle = property_type.as_str();
        filtered.retain(|p| p.title.to_lowercase().contains(needle));
    }

    if let Some(amenities) = &filters.amenities {
        let matching: Vec<Property> = filtered
            .iter()
            .filter(|p| {
                let labels: Vec<String> = p
                    .amenity_labels()
                    .iter()
                    .map(|a| a.to_lowercase())
                    .collect();
                amenities.iter().any(|a| labels.contains(a))
            })
            .cloned()
            .collect();

        if !matching.is_empty() {
            filtered = matching;
        }
    }

    debug!(
        before = properties.len(),
        after = filtered.len(),
        "filtering narrowed catalog"
    );
    filtered
}
