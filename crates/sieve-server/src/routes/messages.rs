use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sieve::models::message::Message;

#[derive(Debug, Deserialize, Serialize)]
struct SanitizeRequest {
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize, Serialize)]
struct SanitizeResponse {
    messages: Vec<Message>,
}

// Display copy of a conversation: sanitized, without messages that have nothing to show
async fn sanitize_messages(
    State(state): State<AppState>,
    Json(request): Json<SanitizeRequest>,
) -> Json<SanitizeResponse> {
    let messages = state.sanitizer.sanitize_history(&request.messages);
    tracing::debug!(
        received = request.messages.len(),
        visible = messages.len(),
        "sanitized conversation"
    );
    Json(SanitizeResponse { messages })
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/messages/sanitize", post(sanitize_messages))
        .with_state(state)
}
