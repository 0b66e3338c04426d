//! Spanish vocabulary configuration
//!
//! Neighborhood gazetteer, amenity terms with their WhatsApp icons, and
//! greeting keywords. Loaded from YAML when configured, otherwise the
//! compiled-in Bogotá/Medellín defaults apply.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::ConfigError;

/// Vocabulary loaded from vocabulary.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Known neighborhood names, lowercase. Matching is in list order.
    #[serde(default = "default_neighborhoods")]
    pub neighborhoods: Vec<String>,

    /// Known amenity terms, lowercase. Matching is in list order.
    #[serde(default = "default_amenities")]
    pub amenities: Vec<String>,

    /// Icon glyph per amenity term
    #[serde(default = "default_amenity_icons")]
    pub amenity_icons: HashMap<String, String>,

    /// Keywords that mark a first message as a plain greeting
    #[serde(default = "default_greeting_keywords")]
    pub greeting_keywords: Vec<String>,
}

fn default_neighborhoods() -> Vec<String> {
    [
        "chapinero",
        "usaquen",
        "chico",
        "cedritos",
        "salitre",
        "poblado",
        "laureles",
        "envigado",
        "sabaneta",
        "belen",
        "estadio",
        "itagui",
        "caldas",
        "estrella",
        "robledo",
        "santa barbara",
        "rosales",
        "teusaquillo",
        "suba",
        "bosa",
        "kennedy",
        "candelaria",
        "fontibon",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_amenities() -> Vec<String> {
    [
        "piscina",
        "gimnasio",
        "gym",
        "parqueadero",
        "parking",
        "terraza",
        "balcón",
        "balcon",
        "jardín",
        "jardin",
        "seguridad",
        "vigilancia",
        "ascensor",
        "bbq",
        "playground",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_amenity_icons() -> HashMap<String, String> {
    [
        ("piscina", "🏊"),
        ("gimnasio", "🏋️"),
        ("gym", "🏋️"),
        ("parqueadero", "🚗"),
        ("parking", "🚗"),
        ("terraza", "🌇"),
        ("balcón", "🏙️"),
        ("balcon", "🏙️"),
        ("jardín", "🌳"),
        ("jardin", "🌳"),
        ("seguridad", "🔒"),
        ("vigilancia", "👮"),
        ("ascensor", "🛗"),
        ("bbq", "🍖"),
        ("playground", "🎯"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_greeting_keywords() -> Vec<String> {
    ["hola", "buenos días", "buenas", "saludos"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            neighborhoods: default_neighborhoods(),
            amenities: default_amenities(),
            amenity_icons: default_amenity_icons(),
            greeting_keywords: default_greeting_keywords(),
        }
    }
}

impl Vocabulary {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound(path.as_ref().display().to_string(), e.to_string())
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Neighborhoods mentioned in the text, in gazetteer order
    pub fn find_neighborhoods(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.neighborhoods
            .iter()
            .filter(|n| lower.contains(n.as_str()))
            .cloned()
            .collect()
    }

    /// Amenity terms mentioned in the text, in vocabulary order
    pub fn find_amenities(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.amenities
            .iter()
            .filter(|a| lower.contains(a.as_str()))
            .cloned()
            .collect()
    }

    /// Icon glyph for an amenity term, if known
    pub fn icon_for(&self, amenity: &str) -> Option<&str> {
        self.amenity_icons
            .get(&amenity.to_lowercase())
            .map(|s| s.as_str())
    }

    /// Whether the text contains a greeting keyword
    pub fn is_greeting(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.greeting_keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}
