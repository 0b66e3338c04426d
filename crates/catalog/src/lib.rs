//! Property catalog backed by a JSON file
//!
//! The catalog is small and read-only; it is re-read on every call so
//! listing updates land without a restart. When the file is absent a
//! compiled-in two-listing sample keeps the agent demonstrable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use concierge_core::{Error, Property, PropertySource, Result};

/// JSON-file backed [`PropertySource`]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn load(&self) -> Result<Vec<Property>> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "catalog file not found, using sample listings");
            return Ok(sample_properties());
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::catalog(format!("{}: {e}", self.path.display())))?;

        serde_json::from_str(&raw)
            .map_err(|e| Error::catalog(format!("{}: {e}", self.path.display())))
    }
}

#[async_trait]
impl PropertySource for FileCatalog {
    async fn all_properties(&self) -> Result<Vec<Property>> {
        self.load().await
    }

    async fn property_by_id(&self, id: &str) -> Result<Option<Property>> {
        let properties = self.load().await?;
        Ok(properties.into_iter().find(|p| p.id == id))
    }
}

/// Compiled-in sample listings used when no catalog file is configured
pub fn sample_properties() -> Vec<Property> {
    vec![
        Property {
            id: "prop1".to_string(),
            title: "Apartamento en Chapinero".to_string(),
            price: 450_000_000,
            bedrooms: 2,
            bathrooms: 2,
            area: 75,
            neighborhood: "Chapinero".to_string(),
            description: "Hermoso apartamento en Chapinero con vista a la ciudad".to_string(),
            url: "https://lahaus.com/properties/prop1".to_string(),
            amenities: Some(vec![
                "Gimnasio".to_string(),
                "Piscina".to_string(),
                "Seguridad 24h".to_string(),
            ]),
            construction_year: None,
            stratum: None,
        },
        Property {
            id: "prop2".to_string(),
            title: "Casa en Usaquén".to_string(),
            price: 950_000_000,
            bedrooms: 3,
            bathrooms: 3,
            area: 150,
            neighborhood: "Usaquén".to_string(),
            description: "Amplia casa con jardín en zona exclusiva de Usaquén".to_string(),
            url: "https://lahaus.com/properties/prop2".to_string(),
            amenities: Some(vec![
                "Jardín".to_string(),
                "Parqueadero".to_string(),
                "Seguridad 24h".to_string(),
            ]),
            construction_year: None,
            stratum: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn missing_file_falls_back_to_samples() {
        let catalog = FileCatalog::new("does/not/exist.json");
        let properties = catalog.all_properties().await.unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].id, "prop1");
    }

    #[tokio::test]
    async fn reads_listings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let listings = serde_json::to_string(&sample_properties()[..1]).unwrap();
        file.write_all(listings.as_bytes()).unwrap();

        let catalog = FileCatalog::new(file.path());
        let properties = catalog.all_properties().await.unwrap();
        assert_eq!(properties.len(), 1);
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let catalog = FileCatalog::new(file.path());
        assert!(catalog.all_properties().await.is_err());
    }

    #[tokio::test]
    async fn lookup_by_id() {
        let catalog = FileCatalog::new("does/not/exist.json");
        let found = catalog.property_by_id("prop2").await.unwrap();
        assert_eq!(found.unwrap().title, "Casa en Usaquén");

        let missing = catalog.property_by_id("prop999").await.unwrap();
        assert!(missing.is_none());
    }
}
