//! Conversational message templates

use concierge_core::{FilterSet, Property, PropertyType};

use crate::format::format_price;

/// Welcome message for a user's first contact
pub fn format_welcome_message(agent_name: &str, company: &str) -> String {
    let mut message = format!("¡Hola! Soy {agent_name}, tu asistente virtual de {company} 🏡\n\n");
    message.push_str(
        "Puedo ayudarte a encontrar la propiedad perfecta según tus necesidades. \
         Cuéntame qué tipo de inmueble estás buscando:\n\n",
    );
    message.push_str("• ¿En qué zona o barrio te gustaría vivir?\n");
    message.push_str("• ¿Cuál es tu presupuesto?\n");
    message.push_str("• ¿Cuántas habitaciones y baños necesitas?\n");
    message.push_str("• ¿Buscas alguna característica especial? (gimnasio, piscina, etc.)\n\n");
    message.push_str(
        "Por ejemplo, puedes decirme: \"Busco un apartamento en Chapinero con 2 habitaciones y un presupuesto de 450 millones de pesos\"",
    );
    message
}

/// No-results message, annotated with the filter most likely to have
/// over-constrained the search (price first, then neighborhood, then
/// bedrooms, then amenities)
pub fn format_no_results_message(filters: Option<&FilterSet>) -> String {
    let mut message =
        "No encontré propiedades que coincidan exactamente con tus criterios. ".to_string();

    if let Some(filters) = filters {
        if let Some(max_price) = filters.max_price {
            message.push_str(&format!(
                "El presupuesto máximo de {} puede ser muy ajustado para las características que buscas. ",
                format_price(max_price)
            ));
        } else if let Some(neighborhoods) = &filters.neighborhoods {
            message.push_str(&format!(
                "No tenemos muchas propiedades disponibles en {} actualmente. ",
                neighborhoods.join(", ")
            ));
        } else if let Some(bedrooms) = filters.min_bedrooms {
            message.push_str(&format!(
                "Quizás el mínimo de {bedrooms} habitaciones está limitando las opciones. "
            ));
        } else if let Some(amenities) = &filters.amenities {
            message.push_str(&format!(
                "Las características que pides ({}) reducen bastante las opciones. ",
                amenities.join(", ")
            ));
        }
    }

    message.push_str("\n\n¿Podrías ajustar alguno de estos criterios o contarme más sobre lo que buscas?");
    message
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Echo the extracted filters back to the user
pub fn format_filter_summary(filters: &FilterSet) -> String {
    if filters.is_empty() {
        return "Estoy buscando propiedades según tus preferencias generales.".to_string();
    }

    let mut summary =
        "*Estoy buscando propiedades con las siguientes características:*\n".to_string();

    if let Some(property_type) = filters.property_type {
        let label = match property_type {
            PropertyType::Apartamento => "Apartamento",
            PropertyType::Casa => "Casa",
        };
        summary.push_str(&format!("• *Tipo:* {label}\n"));
    }

    if let Some(neighborhoods) = &filters.neighborhoods {
        let names: Vec<String> = neighborhoods.iter().map(|n| capitalize(n)).collect();
        summary.push_str(&format!("• *Ubicación:* {}\n", names.join(", ")));
    }

    match (filters.min_price, filters.max_price) {
        (Some(min), Some(max)) => {
            summary.push_str(&format!(
                "• *Precio:* Entre {} y {}\n",
                format_price(min),
                format_price(max)
            ));
        }
        (None, Some(max)) => {
            summary.push_str(&format!("• *Precio máximo:* {}\n", format_price(max)));
        }
        (Some(min), None) => {
            summary.push_str(&format!("• *Precio mínimo:* {}\n", format_price(min)));
        }
        (None, None) => {}
    }

    if let Some(bedrooms) = filters.min_bedrooms {
        summary.push_str(&format!("• *Habitaciones:* {bedrooms}+\n"));
    }
    if let Some(bathrooms) = filters.min_bathrooms {
        summary.push_str(&format!("• *Baños:* {bathrooms}+\n"));
    }
    if let Some(area) = filters.min_area {
        summary.push_str(&format!("• *Área mínima:* {area} m²\n"));
    }

    if let Some(amenities) = &filters.amenities {
        let names: Vec<String> = amenities.iter().map(|a| capitalize(a)).collect();
        summary.push_str(&format!("• *Características:* {}\n", names.join(", ")));
    }

    summary
}

/// Viewing request confirmation
pub fn format_viewing_request(
    property_id: &str,
    property_title: &str,
    contact_info: Option<&str>,
) -> String {
    let mut message = format!(
        "¡Perfecto! Para agendar una visita a la {property_title} (Ref: {property_id}), "
    );

    match contact_info {
        Some(contact) => {
            message.push_str(&format!("utilizaré tu información de contacto ({contact}). "));
        }
        None => {
            message.push_str(
                "necesitaré algunos datos adicionales. ¿Podrías proporcionarme un número de teléfono y tu disponibilidad de horario? ",
            );
        }
    }

    message.push_str(
        "\n\nUn asesor de LaHaus se pondrá en contacto contigo en las próximas 24 horas para coordinar la visita. ",
    );
    message.push_str(
        "También puedes contactarnos directamente al +57 300 123 4567 si prefieres una respuesta más rápida.",
    );
    message
}

/// Human-agent handoff message
pub fn format_contact_agent_request(property_id: Option<&str>, question: Option<&str>) -> String {
    let mut message =
        "Voy a solicitar que uno de nuestros asesores se ponga en contacto contigo".to_string();

    if let Some(id) = property_id {
        message.push_str(&format!(
            " con conocimiento específico sobre la propiedad (Ref: {id})"
        ));
    }
    message.push_str(". ");

    if let Some(question) = question {
        message.push_str(&format!(
            "Le informaré que tienes la siguiente consulta: \"{question}\". "
        ));
    }

    message.push_str(
        "\n\nTe contactarán en las próximas 24 horas. ¿Hay algo más en lo que pueda ayudarte mientras tanto?",
    );
    message
}

/// How-to-search guidance
pub fn format_search_instructions() -> String {
    let mut message = "🔍 *Cómo buscar propiedades con LaHaus*\n\n".to_string();
    message.push_str("Puedes contarme lo que buscas con tus propias palabras, incluyendo:\n\n");
    message.push_str("• *Tipo de propiedad:* apartamento o casa\n");
    message.push_str("• *Ubicación:* el barrio o la zona donde quieres vivir\n");
    message.push_str("• *Presupuesto:* por ejemplo \"hasta 500 millones\" o \"entre 300 y 600 millones\"\n");
    message.push_str("• *Tamaño:* número de habitaciones, baños o metros cuadrados\n");
    message.push_str("• *Características especiales:* piscina, gimnasio, terraza, parqueadero...\n\n");
    message.push_str(
        "Por ejemplo: \"Busco un apartamento en Chapinero con 2 habitaciones y piscina, presupuesto 450 millones\"",
    );
    message
}

/// Follow-up question suggestions derived from the shown properties,
/// falling back to a generic list, capped at 5
pub fn format_follow_up_questions(properties: Option<&[Property]>) -> Vec<String> {
    const CAP: usize = 5;

    let generic = [
        "¿Cuál es tu presupuesto aproximado?",
        "¿En qué zonas te gustaría vivir?",
        "¿Cuántas habitaciones necesitas?",
        "¿Buscas apartamento o casa?",
        "¿Qué características especiales son importantes para ti?",
    ];

    let mut questions: Vec<String> = Vec::new();

    if let Some(properties) = properties.filter(|p| !p.is_empty()) {
        let average = properties.iter().map(|p| p.price).sum::<u64>() / properties.len() as u64;
        questions.push(format!(
            "¿Se ajusta a tu presupuesto un rango alrededor de {}?",
            format_price(average)
        ));

        let mut neighborhoods: Vec<&str> = Vec::new();
        for property in properties {
            if !neighborhoods.contains(&property.neighborhood.as_str()) {
                neighborhoods.push(&property.neighborhood);
            }
        }
        questions.push(format!(
            "¿Te interesan otras zonas además de {}?",
            neighborhoods.join(", ")
        ));

        let has_apartment = properties
            .iter()
            .any(|p| p.title.to_lowercase().contains("apartamento"));
        let has_house = properties.iter().any(|p| p.title.to_lowercase().contains("casa"));
        if has_apartment && !has_house {
            questions.push("¿Considerarías también una casa?".to_string());
        } else if has_house && !has_apartment {
            questions.push("¿Considerarías también un apartamento?".to_string());
        }
    }

    for question in generic {
        if questions.len() >= CAP {
            break;
        }
        questions.push(question.to_string());
    }

    questions.truncate(CAP);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_filters() -> FilterSet {
        FilterSet {
            property_type: Some(PropertyType::Apartamento),
            neighborhoods: Some(vec!["chapinero".into(), "usaquén".into()]),
            min_price: Some(300_000_000),
            max_price: Some(500_000_000),
            min_bedrooms: Some(2),
            min_bathrooms: Some(2),
            min_area: Some(75),
            amenities: Some(vec!["parqueadero".into(), "gimnasio".into()]),
        }
    }

    fn sample_properties() -> Vec<Property> {
        vec![
            Property {
                id: "12345".into(),
                title: "Apartamento en Chapinero".into(),
                price: 450_000_000,
                bedrooms: 2,
                bathrooms: 2,
                area: 85,
                neighborhood: "Chapinero".into(),
                description: "Hermoso apartamento.".into(),
                url: "https://lahaus.com/property/12345".into(),
                amenities: None,
                construction_year: None,
                stratum: None,
            },
            Property {
                id: "67890".into(),
                title: "Apartamento en Usaquén".into(),
                price: 550_000_000,
                bedrooms: 3,
                bathrooms: 2,
                area: 95,
                neighborhood: "Usaquén".into(),
                description: "Apartamento con vista.".into(),
                url: "https://lahaus.com/property/67890".into(),
                amenities: None,
                construction_year: None,
                stratum: None,
            },
        ]
    }

    #[test]
    fn welcome_message_contents() {
        let welcome = format_welcome_message("Karol", "LaHaus");
        assert!(welcome.contains("¡Hola! Soy Karol, tu asistente virtual de LaHaus"));
        assert!(welcome.contains("zona o barrio"));
        assert!(welcome.contains("presupuesto"));
        assert!(welcome.contains("habitaciones y baños"));
        assert!(welcome.contains("característica especial"));
    }

    #[test]
    fn no_results_names_the_price_ceiling_first() {
        let message = format_no_results_message(Some(&sample_filters()));
        assert!(message.contains("No encontré propiedades que coincidan exactamente con tus criterios"));
        assert!(message.contains("El presupuesto máximo de"));
        assert!(message.contains("$500.000.000"));
        // Price takes priority over the neighborhood annotation
        assert!(!message.contains("No tenemos muchas propiedades"));
    }

    #[test]
    fn no_results_without_filters() {
        let message = format_no_results_message(None);
        assert!(message.contains("No encontré propiedades que coincidan exactamente con tus criterios"));
    }

    #[test]
    fn no_results_neighborhood_annotation() {
        let filters = FilterSet {
            neighborhoods: Some(vec!["chapinero".into()]),
            ..Default::default()
        };
        let message = format_no_results_message(Some(&filters));
        assert!(message.contains("No tenemos muchas propiedades disponibles en chapinero"));
    }

    #[test]
    fn filter_summary_lists_everything() {
        let summary = format_filter_summary(&sample_filters());
        assert!(summary.contains("*Estoy buscando propiedades con las siguientes características:*"));
        assert!(summary.contains("*Tipo:* Apartamento"));
        assert!(summary.contains("*Ubicación:* Chapinero, Usaquén"));
        assert!(summary.contains("*Precio:* Entre"));
        assert!(summary.contains("*Habitaciones:* 2+"));
        assert!(summary.contains("*Baños:* 2+"));
        assert!(summary.contains("*Área mínima:* 75 m²"));
        assert!(summary.contains("*Características:* Parqueadero, Gimnasio"));
    }

    #[test]
    fn empty_filter_summary() {
        assert_eq!(
            format_filter_summary(&FilterSet::default()),
            "Estoy buscando propiedades según tus preferencias generales."
        );
    }

    #[test]
    fn viewing_request_variants() {
        let message = format_viewing_request("12345", "Apartamento en Chapinero", Some("123-456-7890"));
        assert!(message.contains("Para agendar una visita a la Apartamento en Chapinero (Ref: 12345)"));
        assert!(message.contains("utilizaré tu información de contacto (123-456-7890)"));

        let message = format_viewing_request("12345", "Apartamento en Chapinero", None);
        assert!(message.contains("necesitaré algunos datos adicionales"));
        assert!(message.contains("¿Podrías proporcionarme un número de teléfono"));
    }

    #[test]
    fn contact_agent_variants() {
        let message = format_contact_agent_request(
            Some("12345"),
            Some("¿Cuándo estará disponible para mudarse?"),
        );
        assert!(message.contains("con conocimiento específico sobre la propiedad (Ref: 12345)"));
        assert!(message
            .contains("tienes la siguiente consulta: \"¿Cuándo estará disponible para mudarse?\""));

        let message = format_contact_agent_request(None, None);
        assert!(message
            .contains("Voy a solicitar que uno de nuestros asesores se ponga en contacto contigo"));
    }

    #[test]
    fn search_instructions_contents() {
        let instructions = format_search_instructions();
        assert!(instructions.contains("Cómo buscar propiedades con LaHaus"));
        assert!(instructions.contains("Tipo de propiedad:"));
        assert!(instructions.contains("Ubicación:"));
        assert!(instructions.contains("Presupuesto:"));
        assert!(instructions.contains("Tamaño:"));
        assert!(instructions.contains("Características especiales:"));
    }

    #[test]
    fn follow_up_questions_derived_and_capped() {
        let properties = sample_properties();
        let questions = format_follow_up_questions(Some(&properties));
        assert!(questions.len() <= 5);
        assert!(questions.iter().any(|q| q.to_lowercase().contains("presupuesto")));
        assert!(questions.iter().any(|q| q.to_lowercase().contains("zonas")));
        // All apartments, so the type-gap question suggests a house
        assert!(questions.iter().any(|q| q.contains("casa")));
    }

    #[test]
    fn follow_up_questions_generic_fallback() {
        let questions = format_follow_up_questions(None);
        assert_eq!(questions.len(), 5);
    }
}
