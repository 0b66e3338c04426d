//! Property cards, lists, galleries and comparisons

use concierge_config::Vocabulary;
use concierge_core::Property;

use crate::amenities::{format_amenities, AmenityStyle};
use crate::format::{add_line_breaks, format_price, truncate_text};

const NO_RESULTS: &str = "No encontré propiedades que coincidan con tus criterios. ¿Podrías darme más detalles sobre lo que buscas?";

const MISSING_FIELD: &str = "Error: Falta información de la propiedad";

/// One-liner-per-attribute summary of a property
pub fn format_property_brief(property: &Property, index: Option<usize>) -> String {
    let price = format_price(property.price);

    let mut brief = match index {
        Some(i) => format!("*{i}. {}*\n", property.title),
        None => format!("*{}*\n", property.title),
    };

    brief.push_str(&format!(
        "💰 {price} | 🛏️ {} hab | 📏 {} m²\n",
        property.bedrooms, property.area
    ));

    let preview: Vec<&str> = property.description.split_whitespace().take(6).collect();
    brief.push_str(&format!(
        "📍 {} | {}...\n",
        property.neighborhood,
        preview.join(" ")
    ));

    brief.push_str(&format!("🔗 {}\n", property.url));
    brief
}

/// Full card for a single property
///
/// The detailed variant adds the wrapped description, construction
/// year and stratum when present, and a visit call-to-action.
pub fn format_property_card(vocabulary: &Vocabulary, property: &Property, detailed: bool) -> String {
    let price = format_price(property.price);

    let mut card = format!("*{}* (Ref: {})\n", property.title, property.id);
    card.push_str(&format!("💰 {price}\n"));
    card.push_str(&format!(
        "🛏️ {} habitaciones | 🚿 {} baños\n",
        property.bedrooms, property.bathrooms
    ));
    card.push_str(&format!(
        "📏 {} m² | 📍 {}\n",
        property.area, property.neighborhood
    ));

    let amenities = property.amenity_labels();
    if !amenities.is_empty() {
        card.push_str(&format!(
            "\n✨ *Características:* {}\n",
            format_amenities(vocabulary, amenities, 3, AmenityStyle::Inline)
        ));
    }

    if detailed {
        card.push_str(&format!(
            "\n📝 *Descripción:*\n{}\n",
            add_line_breaks(&property.description, 40)
        ));
        if let Some(year) = property.construction_year {
            card.push_str(&format!("🏗️ *Año de construcción:* {year}\n"));
        }
        if let Some(stratum) = property.stratum {
            card.push_str(&format!("🏢 *Estrato:* {stratum}\n"));
        }
        card.push_str(&format!("\nVer detalles: {}\n", property.url));
        card.push_str("\n¿Te gustaría agendar una visita a esta propiedad?");
    } else {
        card.push_str(&format!(
            "\n{}\n",
            truncate_text(&property.description, 100, true)
        ));
        card.push_str(&format!("\nVer detalles: {}\n", property.url));
        card.push_str("\n¿Te gustaría más información sobre esta propiedad?");
    }

    card
}

/// Card formatting for a raw catalog record
///
/// Untyped records can be incomplete; a missing field degrades to a
/// visible error string naming the field instead of a crash.
pub fn format_property_record(
    vocabulary: &Vocabulary,
    record: &serde_json::Value,
    detailed: bool,
) -> String {
    const REQUIRED: [&str; 9] = [
        "id",
        "title",
        "price",
        "bedrooms",
        "bathrooms",
        "area",
        "neighborhood",
        "description",
        "url",
    ];

    for field in REQUIRED {
        if record.get(field).is_none() {
            return format!("{MISSING_FIELD}: '{field}'");
        }
    }

    match serde_json::from_value::<Property>(record.clone()) {
        Ok(property) => format_property_card(vocabulary, &property, detailed),
        Err(e) => format!("{MISSING_FIELD}: {e}"),
    }
}

/// Numbered list of briefs with a result cap
pub fn format_property_list(properties: &[Property], max_properties: usize) -> String {
    if properties.is_empty() {
        return NO_RESULTS.to_string();
    }

    let total = properties.len();
    let shown = &properties[..total.min(max_properties)];

    let mut message = if total == 1 {
        "Encontré esta propiedad que podría interesarte:\n\n".to_string()
    } else {
        format!("*He encontrado {total} propiedades que podrían interesarte:*\n\n")
    };

    for (i, property) in shown.iter().enumerate() {
        message.push_str(&format_property_brief(property, Some(i + 1)));
        message.push('\n');
    }

    if total > max_properties {
        message.push_str(&format!(
            "Y {} propiedades más que coinciden con tus criterios.\n\n",
            total - max_properties
        ));
    }

    message.push_str(
        "¿Cuál de estas propiedades te gustaría conocer mejor? También puedes decirme si buscas algo diferente.",
    );
    message
}

/// Compact gallery view
pub fn format_property_gallery(properties: &[Property], max_properties: usize) -> String {
    if properties.is_empty() {
        return NO_RESULTS.to_string();
    }

    let total = properties.len();
    let shown = &properties[..total.min(max_properties)];

    let mut gallery = format!("📱 *GALERÍA DE PROPIEDADES* ({total} resultados)\n\n");

    for (i, property) in shown.iter().enumerate() {
        gallery.push_str(&format!("{}. {}\n", i + 1, property.title));
        gallery.push_str(&format!(
            "   💰 {} | 🛏️ {} hab\n",
            format_price(property.price),
            property.bedrooms
        ));
        gallery.push_str(&format!("   📍 {}\n", property.neighborhood));
        gallery.push_str(&format!("   🔗 {}\n\n", property.url));
    }

    if total > max_properties {
        gallery.push_str(&format!(
            "...y {} propiedades más disponibles.\n",
            total - max_properties
        ));
    }

    gallery
}

/// Attribute-aligned comparison across two or more properties
pub fn format_property_comparison(properties: &[Property]) -> String {
    if properties.len() < 2 {
        return "Se necesitan al menos 2 propiedades para hacer una comparación. ¿Te gustaría ver más opciones?".to_string();
    }

    let mut comparison = "📊 *COMPARACIÓN DE PROPIEDADES*\n\n".to_string();

    for (i, property) in properties.iter().enumerate() {
        comparison.push_str(&format!("*Propiedad {}:* {}\n", i + 1, property.title));
    }

    comparison.push_str("\n💰 *Precio:*\n");
    for (i, property) in properties.iter().enumerate() {
        comparison.push_str(&format!("{}. {}\n", i + 1, format_price(property.price)));
    }

    comparison.push_str("\n🛏️ *Habitaciones:*\n");
    for (i, property) in properties.iter().enumerate() {
        comparison.push_str(&format!("{}. {}\n", i + 1, property.bedrooms));
    }

    comparison.push_str("\n🚿 *Baños:*\n");
    for (i, property) in properties.iter().enumerate() {
        comparison.push_str(&format!("{}. {}\n", i + 1, property.bathrooms));
    }

    comparison.push_str("\n📏 *Área:*\n");
    for (i, property) in properties.iter().enumerate() {
        comparison.push_str(&format!("{}. {} m²\n", i + 1, property.area));
    }

    comparison.push_str("\n📍 *Ubicación:*\n");
    for (i, property) in properties.iter().enumerate() {
        comparison.push_str(&format!("{}. {}\n", i + 1, property.neighborhood));
    }

    comparison.push_str("\n¿Cuál de estas propiedades se ajusta mejor a lo que buscas?");
    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_property() -> Property {
        Property {
            id: "12345".into(),
            title: "Apartamento en Chapinero".into(),
            price: 450_000_000,
            bedrooms: 2,
            bathrooms: 2,
            area: 85,
            neighborhood: "Chapinero".into(),
            description:
                "Hermoso apartamento con excelente ubicación, luminoso y con acabados de primera."
                    .into(),
            url: "https://lahaus.com/property/12345".into(),
            amenities: Some(vec![
                "Parqueadero".into(),
                "Gimnasio".into(),
                "Seguridad 24/7".into(),
                "Terraza".into(),
            ]),
            construction_year: Some(2018),
            stratum: Some(4),
        }
    }

    fn sample_properties() -> Vec<Property> {
        vec![
            sample_property(),
            Property {
                id: "67890".into(),
                title: "Casa en Chía".into(),
                price: 650_000_000,
                bedrooms: 3,
                bathrooms: 3,
                area: 120,
                neighborhood: "Chía".into(),
                description: "Amplia casa con jardín, perfecta para familias.".into(),
                url: "https://lahaus.com/property/67890".into(),
                amenities: Some(vec!["Jardín".into(), "Parqueadero".into(), "Piscina".into()]),
                construction_year: None,
                stratum: None,
            },
            Property {
                id: "24680".into(),
                title: "Apartamento en Usaquén".into(),
                price: 550_000_000,
                bedrooms: 3,
                bathrooms: 2,
                area: 95,
                neighborhood: "Usaquén".into(),
                description: "Apartamento con excelente vista, cerca a centros comerciales.".into(),
                url: "https://lahaus.com/property/24680".into(),
                amenities: Some(vec!["Parqueadero".into(), "Gimnasio".into()]),
                construction_year: None,
                stratum: None,
            },
        ]
    }

    #[test]
    fn standard_card() {
        let vocab = Vocabulary::default();
        let card = format_property_card(&vocab, &sample_property(), false);
        assert!(card.contains("*Apartamento en Chapinero*"));
        assert!(card.contains("(Ref: 12345)"));
        assert!(card.contains("$450.000.000"));
        assert!(card.contains("2 habitaciones"));
        assert!(card.contains("2 baños"));
        assert!(card.contains("85 m²"));
        assert!(card.contains("Chapinero"));
        assert!(card.contains("¿Te gustaría más información sobre esta propiedad?"));
    }

    #[test]
    fn detailed_card() {
        let vocab = Vocabulary::default();
        let card = format_property_card(&vocab, &sample_property(), true);
        assert!(card.contains("Descripción:"));
        assert!(card.contains("Hermoso"));
        assert!(card.contains("Año de construcción:"));
        assert!(card.contains("2018"));
        assert!(card.contains("Estrato:"));
        assert!(card.contains('4'));
        assert!(card.contains("¿Te gustaría agendar una visita a esta propiedad?"));
    }

    #[test]
    fn record_with_missing_field_degrades() {
        let vocab = Vocabulary::default();
        let record = json!({
            "id": "12345",
            "title": "Apartamento en Chapinero",
            "bedrooms": 2
        });
        let card = format_property_record(&vocab, &record, false);
        assert!(card.contains("Error: Falta información de la propiedad"));
        assert!(card.contains("price"));
    }

    #[test]
    fn complete_record_renders_card() {
        let vocab = Vocabulary::default();
        let record = serde_json::to_value(sample_property()).unwrap();
        let card = format_property_record(&vocab, &record, false);
        assert!(card.contains("(Ref: 12345)"));
    }

    #[test]
    fn brief_with_and_without_index() {
        let property = sample_property();

        let brief = format_property_brief(&property, None);
        assert!(brief.contains("*Apartamento en Chapinero*"));
        assert!(brief.contains("$450.000.000"));
        assert!(brief.contains("2 hab"));
        assert!(brief.contains("85 m²"));
        assert!(brief.contains("Chapinero"));
        assert!(brief.contains(&property.url));

        let indexed = format_property_brief(&property, Some(1));
        assert!(indexed.contains("*1. Apartamento en Chapinero*"));
    }

    #[test]
    fn list_headers_and_overflow() {
        let properties = sample_properties();

        let list = format_property_list(&properties, 5);
        assert!(list.contains("*He encontrado 3 propiedades que podrían interesarte:*"));
        for property in &properties {
            assert!(list.contains(&property.title));
            assert!(list.contains(&format_price(property.price)));
        }

        let limited = format_property_list(&properties, 2);
        assert!(limited.contains("Y 1 propiedades más que coinciden con tus criterios"));

        assert!(format_property_list(&[], 5)
            .contains("No encontré propiedades que coincidan con tus criterios"));
    }

    #[test]
    fn single_result_list() {
        let list = format_property_list(&sample_properties()[..1], 5);
        assert!(list.contains("Encontré esta propiedad que podría interesarte"));
    }

    #[test]
    fn gallery_headers_and_overflow() {
        let properties = sample_properties();

        let gallery = format_property_gallery(&properties, 5);
        assert!(gallery.contains("GALERÍA DE PROPIEDADES"));
        assert!(gallery.contains("(3 resultados)"));
        for (i, property) in properties.iter().enumerate() {
            assert!(gallery.contains(&format!("{}. {}", i + 1, property.title)));
            assert!(gallery.contains(&format_price(property.price)));
        }

        let limited = format_property_gallery(&properties, 2);
        assert!(limited.contains("...y 1 propiedades más disponibles"));

        assert!(format_property_gallery(&[], 5)
            .contains("No encontré propiedades que coincidan con tus criterios"));
    }

    #[test]
    fn comparison_requires_two() {
        let properties = sample_properties();

        let comparison = format_property_comparison(&properties);
        assert!(comparison.contains("COMPARACIÓN DE PROPIEDADES"));
        assert!(comparison.contains("Propiedad 1"));
        assert!(comparison.contains("Propiedad 2"));
        assert!(comparison.contains("Propiedad 3"));
        assert!(comparison.contains("Habitaciones:"));
        assert!(comparison.contains("Baños:"));
        assert!(comparison.contains("Área:"));
        assert!(comparison.contains("Ubicación:"));

        assert!(format_property_comparison(&properties[..1])
            .contains("Se necesitan al menos 2 propiedades"));
        assert!(format_property_comparison(&[]).contains("Se necesitan al menos 2 propiedades"));
    }
}
