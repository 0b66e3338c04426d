//! Property catalog trait

use async_trait::async_trait;

use crate::error::Result;
use crate::property::Property;

/// Read-only source of property listings
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// All available listings
    async fn all_properties(&self) -> Result<Vec<Property>>;

    /// Single listing by id, `None` when unknown
    async fn property_by_id(&self, id: &str) -> Result<Option<Property>>;
}
