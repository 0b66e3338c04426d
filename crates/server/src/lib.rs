//! HTTP server for the WhatsApp property concierge

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
