//! HTTP endpoints
//!
//! Twilio delivers WhatsApp messages as form-encoded POSTs to
//! `/webhook` and expects TwiML back. `/health` reports liveness plus
//! conversation counters.

use std::time::Duration;

use axum::{
    extract::{Form, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use concierge_templates::format_whatsapp_message;

use crate::state::AppState;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/webhook", post(webhook))
        .route("/health", get(health));

    if state.settings.server.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.settings.server.timeout_seconds,
        )))
        .with_state(state)
}

/// Twilio WhatsApp webhook payload (the fields we use)
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    /// Sender, e.g. "whatsapp:+573001112233"
    #[serde(rename = "From", default)]
    pub from: String,
    /// Message text
    #[serde(rename = "Body", default)]
    pub body: String,
}

async fn webhook(
    State(state): State<AppState>,
    Form(message): Form<IncomingMessage>,
) -> impl IntoResponse {
    let twiml = respond(&state, &message.from, &message.body).await;
    ([(header::CONTENT_TYPE, "application/xml")], twiml)
}

/// Run one exchange and wrap the reply as TwiML
async fn respond(state: &AppState, from: &str, body: &str) -> String {
    let text = body.trim();
    info!(from, text, "incoming whatsapp message");

    let reply = state.agent.handle(from, text).await;
    let formatted = format_whatsapp_message(&reply);

    info!(to = from, "sending reply");
    twiml_message(&formatted)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "conversations": state.store.conversation_count(),
        "messages": state.store.total_turns(),
    }))
}

fn twiml_message(message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape_xml(message)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_config::Settings;

    fn test_state() -> AppState {
        AppState::from_settings(Settings::default()).unwrap()
    }

    #[tokio::test]
    async fn webhook_wraps_reply_in_twiml() {
        let state = test_state();

        let twiml = respond(&state, "whatsapp:+573001112233", "hola").await;

        assert!(twiml.starts_with("<?xml version=\"1.0\""));
        assert!(twiml.contains("<Response><Message>"));
        // first-turn greeting gets the canned welcome
        assert!(twiml.contains("Karol"));
    }

    #[tokio::test]
    async fn conversations_are_kept_per_sender() {
        let state = test_state();

        respond(&state, "whatsapp:+573001112233", "hola").await;
        respond(&state, "whatsapp:+573009998877", "hola").await;

        assert_eq!(state.store.conversation_count(), 2);
        assert_eq!(state.store.total_turns(), 4);
    }

    #[test]
    fn xml_special_characters_are_escaped() {
        assert_eq!(
            escape_xml("2 < 3 & \"tildes\""),
            "2 &lt; 3 &amp; &quot;tildes&quot;"
        );
    }

    #[test]
    fn twiml_embeds_the_message() {
        let twiml = twiml_message("Hola, ¿buscas apartamento?");
        assert!(twiml.contains("Hola, ¿buscas apartamento?"));
        assert!(twiml.ends_with("</Message></Response>"));
    }
}
