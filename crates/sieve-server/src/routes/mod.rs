// Export route modules
pub mod config;
pub mod messages;
pub mod traces;

use crate::state::AppState;
use axum::Router;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(config::routes(state.clone()))
        .merge(messages::routes(state.clone()))
        .merge(traces::routes(state))
}
