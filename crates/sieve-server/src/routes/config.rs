use crate::configuration::Settings;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

const UNKNOWN_ENDPOINT: &str = "Unknown endpoint";
const UNKNOWN_EXPERIMENT: &str = "Unknown experiment";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub chat_history: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Feature flags and deployment details shown by the client
pub struct ClientConfig {
    pub features: Features,
    pub serving_endpoint: String,
    pub serving_experiment: String,
}

impl ClientConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            features: Features {
                chat_history: settings.database.is_available(),
            },
            serving_endpoint: settings
                .databricks
                .serving_endpoint
                .clone()
                .unwrap_or_else(|| UNKNOWN_ENDPOINT.to_string()),
            serving_experiment: settings
                .databricks
                .serving_experiment
                .clone()
                .unwrap_or_else(|| UNKNOWN_EXPERIMENT.to_string()),
        }
    }
}

async fn get_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(state.client_config)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/config", get(get_config))
        .with_state(state)
}
