use crate::configuration::Settings;
use crate::routes::config::ClientConfig;
use sieve::auth::{EnvTokenProvider, StaticTokenProvider, TokenProvider};
use sieve::errors::TraceResult;
use sieve::traces::MlflowTraceLogger;
use sieve::Sanitizer;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sanitizer: Arc<Sanitizer>,
    pub client_config: ClientConfig,
    /// Absent when no Databricks host is configured
    pub traces: Option<Arc<MlflowTraceLogger>>,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> TraceResult<Self> {
        let traces = match &settings.databricks.host {
            Some(host) => {
                let tokens: Arc<dyn TokenProvider> = match &settings.databricks.token {
                    Some(token) => Arc::new(StaticTokenProvider::new(token.clone())),
                    None => Arc::new(EnvTokenProvider::default()),
                };
                Some(Arc::new(MlflowTraceLogger::new(
                    host,
                    settings.databricks.serving_experiment.clone(),
                    tokens,
                )?))
            }
            None => None,
        };

        Ok(Self {
            sanitizer: Arc::new(Sanitizer::new(settings.sanitizer.clone())),
            client_config: ClientConfig::from_settings(settings),
            traces,
        })
    }
}
