mod configuration;
mod error;
mod routes;
mod state;

use configuration::Settings;
use state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let settings = Settings::new()?;
    let addr = settings.server.socket_addr()?;
    let state = AppState::from_settings(&settings)?;

    if state.traces.is_none() {
        info!("no Databricks host configured, trace upload disabled");
    }

    // Create router with CORS support
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
