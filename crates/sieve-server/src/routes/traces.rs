use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use sieve::traces::{TraceOutcome, TracePayload};

// Upload happens in the background; its failures are logged, the client is never blocked on them
async fn log_trace(State(state): State<AppState>, Json(payload): Json<TracePayload>) -> StatusCode {
    let Some(logger) = state.traces.clone() else {
        tracing::warn!("Databricks host not configured, dropping trace");
        return StatusCode::ACCEPTED;
    };

    tokio::spawn(async move {
        match logger.log(&payload).await {
            Ok(TraceOutcome::Logged) | Ok(TraceOutcome::Skipped) => {}
            Err(e) => {
                tracing::error!(chat_id = %payload.chat_id, "Failed to log trace: {}", e);
            }
        }
    });

    StatusCode::ACCEPTED
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/traces", post(log_trace))
        .with_state(state)
}
