//! WhatsApp message rendering
//!
//! Pure string-producing functions from structured data to
//! WhatsApp-ready Spanish text. No network or storage access; every
//! function here is total over its inputs and degrades to a visible
//! error message rather than panicking.

pub mod amenities;
pub mod cards;
pub mod format;
pub mod messages;
pub mod whatsapp;

pub use amenities::{format_amenities, AmenityStyle};
pub use cards::{
    format_property_brief, format_property_card, format_property_comparison,
    format_property_gallery, format_property_list, format_property_record,
};
pub use format::{add_line_breaks, format_date, format_location, format_price, truncate_text};
pub use messages::{
    format_contact_agent_request, format_filter_summary, format_follow_up_questions,
    format_no_results_message, format_search_instructions, format_viewing_request,
    format_welcome_message,
};
pub use whatsapp::format_whatsapp_message;
