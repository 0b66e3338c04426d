//! Amenity rendering with icon glyphs

use concierge_config::Vocabulary;

/// Display style for an amenity block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmenityStyle {
    /// One amenity per line
    List,
    /// Comma-separated on one line
    #[default]
    Inline,
    /// Bulleted lines
    Bullets,
}

/// Icon for an amenity label: first vocabulary term contained in the
/// label wins, bullet glyph when nothing matches
fn icon_for_label(vocabulary: &Vocabulary, label: &str) -> String {
    let lower = label.to_lowercase();
    for term in &vocabulary.amenities {
        if lower.contains(term.as_str()) {
            if let Some(icon) = vocabulary.icon_for(term) {
                return icon.to_string();
            }
        }
    }
    "•".to_string()
}

/// Render amenities capped at `max_display` with a "más" suffix
pub fn format_amenities(
    vocabulary: &Vocabulary,
    amenities: &[String],
    max_display: usize,
    style: AmenityStyle,
) -> String {
    if amenities.is_empty() {
        return String::new();
    }

    let shown = &amenities[..amenities.len().min(max_display)];
    let hidden = amenities.len().saturating_sub(max_display);

    match style {
        AmenityStyle::List => {
            let mut lines: Vec<String> = shown
                .iter()
                .map(|a| format!("{} {}", icon_for_label(vocabulary, a), a))
                .collect();
            if hidden > 0 {
                lines.push(format!("...y {hidden} más"));
            }
            lines.join("\n")
        }
        AmenityStyle::Inline => {
            let joined = shown
                .iter()
                .map(|a| format!("{} {}", icon_for_label(vocabulary, a), a))
                .collect::<Vec<_>>()
                .join(", ");
            if hidden > 0 {
                format!("{joined} (+{hidden} más)")
            } else {
                joined
            }
        }
        AmenityStyle::Bullets => {
            let mut lines: Vec<String> = shown
                .iter()
                .map(|a| format!("• {} {}", icon_for_label(vocabulary, a), a))
                .collect();
            if hidden > 0 {
                lines.push(format!("...y {hidden} más"));
            }
            lines.join("\n")
        }
    }
}
