//! Outgoing message length guard

/// WhatsApp text message character ceiling
const MAX_LENGTH: usize = 4096;

/// Characters reserved for the truncation notice
const RESERVE: usize = 100;

const NOTICE: &str = "\n\n... [Mensaje truncado debido a limitaciones de longitud]";

/// Enforce the WhatsApp length ceiling
///
/// Over-long messages are cut at the last paragraph break, falling
/// back to the last sentence end, at or after the 70% mark; if neither
/// exists the cut is hard. A truncation notice is appended either way.
pub fn format_whatsapp_message(message: &str) -> String {
    let total_chars = message.chars().count();
    if total_chars <= MAX_LENGTH {
        return message.to_string();
    }

    let cut: String = message.chars().take(MAX_LENGTH - RESERVE).collect();

    let min_pos = byte_index_of_char(&cut, MAX_LENGTH * 7 / 10);
    let boundary = cut
        .rfind("\n\n")
        .filter(|&i| i >= min_pos)
        .or_else(|| cut.rfind(". ").filter(|&i| i >= min_pos).map(|i| i + 1));

    let body = match boundary {
        Some(i) => &cut[..i],
        None => cut.as_str(),
    };

    format!("{}{NOTICE}", body.trim_end())
}

fn byte_index_of_char(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map(|(i, _)| i).unwrap_or(text.len())
}
