//! Small formatting utilities

use chrono::{NaiveDate, NaiveDateTime};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Format a peso amount with periods as thousands separators
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("${grouped}")
}

/// Render an ISO date in Spanish, passing unparseable input through
pub fn format_date(raw: &str, include_time: bool) -> String {
    if include_time {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            let date = dt.date();
            return format!(
                "{} de {} de {}, {}",
                format_day(&date),
                month_name(&date),
                format_year(&date),
                dt.format("%H:%M")
            );
        }
    }

    let date_part = raw.split('T').next().unwrap_or(raw);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return format!(
            "{} de {} de {}",
            format_day(&date),
            month_name(&date),
            format_year(&date)
        );
    }

    raw.to_string()
}

fn format_day(date: &NaiveDate) -> String {
    use chrono::Datelike;
    date.day().to_string()
}

fn month_name(date: &NaiveDate) -> &'static str {
    use chrono::Datelike;
    MONTHS[(date.month0()) as usize]
}

fn format_year(date: &NaiveDate) -> String {
    use chrono::Datelike;
    date.year().to_string()
}

/// Shorten text to at most `max_length` characters, cutting at a word
/// boundary when one exists
pub fn truncate_text(text: &str, max_length: usize, add_ellipsis: bool) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_length).collect();
    let trimmed = match cut.rfind(' ') {
        Some(i) if i > 0 => cut[..i].to_string(),
        _ => cut,
    };

    if add_ellipsis {
        format!("{}...", trimmed.trim_end())
    } else {
        trimmed.trim_end().to_string()
    }
}

/// Greedy word wrap for narrow phone screens
pub fn add_line_breaks(text: &str, max_line_length: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_line_length {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Pin-glyph location line, empty when nothing is known
pub fn format_location(neighborhood: &str, city: &str) -> String {
    match (neighborhood.is_empty(), city.is_empty()) {
        (false, false) => format!("📍 {neighborhood}, {city}"),
        (false, true) => format!("📍 {neighborhood}"),
        (true, false) => format!("📍 {city}"),
        (true, true) => String::new(),
    }
}
