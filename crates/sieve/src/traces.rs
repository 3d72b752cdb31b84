use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenProvider;
use crate::errors::{TraceError, TraceResult};

pub const TRACE_NAME: &str = "chat_interaction";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One user/assistant exchange to record
pub struct TracePayload {
    pub chat_id: String,
    pub message_id: String,
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub model_output: String,
    /// Milliseconds since the epoch
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl TracePayload {
    pub fn new<C, M, I, O>(
        chat_id: C,
        message_id: M,
        user_input: I,
        model_output: O,
        started: DateTime<Utc>,
        finished: DateTime<Utc>,
    ) -> Self
    where
        C: Into<String>,
        M: Into<String>,
        I: Into<String>,
        O: Into<String>,
    {
        Self {
            chat_id: chat_id.into(),
            message_id: message_id.into(),
            user_input: user_input.into(),
            model_output: model_output.into(),
            start_time: started.timestamp_millis(),
            end_time: finished.timestamp_millis(),
            user_email: None,
        }
    }

    pub fn with_user_email<S: Into<String>>(mut self, email: S) -> Self {
        self.user_email = Some(email.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Request body of the MLflow trace API
pub struct TraceRecord {
    pub experiment_id: String,
    pub timestamp_ms: i64,
    pub execution_time_ms: i64,
    pub request_metadata: BTreeMap<String, String>,
    pub name: String,
    /// JSON encoded chat messages
    pub inputs: String,
    pub outputs: String,
    pub status: String,
}

impl TraceRecord {
    pub fn from_payload(experiment_id: &str, payload: &TracePayload) -> TraceResult<Self> {
        let inputs = json!([{ "role": "user", "content": payload.user_input }]);
        let outputs = json!([{ "role": "assistant", "content": payload.model_output }]);

        let request_metadata = BTreeMap::from([
            ("mlflow.trace.session".to_string(), payload.chat_id.clone()),
            (
                "mlflow.trace.user".to_string(),
                payload
                    .user_email
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
            ("mlflow.trace.request".to_string(), payload.message_id.clone()),
        ]);

        Ok(Self {
            experiment_id: experiment_id.to_string(),
            timestamp_ms: payload.start_time,
            execution_time_ms: payload.end_time.saturating_sub(payload.start_time).max(0),
            request_metadata,
            name: TRACE_NAME.to_string(),
            inputs: serde_json::to_string(&inputs)?,
            outputs: serde_json::to_string(&outputs)?,
            status: "OK".to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    Logged,
    /// No experiment is configured, nothing was sent
    Skipped,
}

pub struct MlflowTraceLogger {
    client: Client,
    host: String,
    experiment_id: Option<String>,
    tokens: Arc<dyn TokenProvider>,
}

impl MlflowTraceLogger {
    pub fn new(
        host: &str,
        experiment_id: Option<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> TraceResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            host: normalize_host(host),
            experiment_id,
            tokens,
        })
    }

    pub fn experiment_id(&self) -> Option<&str> {
        self.experiment_id.as_deref()
    }

    fn url(&self) -> String {
        format!("{}/api/2.0/mlflow/traces", self.host)
    }

    pub async fn log(&self, payload: &TracePayload) -> TraceResult<TraceOutcome> {
        let Some(experiment_id) = self.experiment_id.as_deref() else {
            tracing::warn!("MLflow experiment not configured, skipping trace");
            return Ok(TraceOutcome::Skipped);
        };

        let record = TraceRecord::from_payload(experiment_id, payload)?;
        let token = self.tokens.token().await?;

        tracing::info!(chat_id = %payload.chat_id, "sending trace to MLflow");
        let response = self
            .client
            .post(self.url())
            .bearer_auth(token)
            .json(&record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TraceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(chat_id = %payload.chat_id, "trace logged");
        Ok(TraceOutcome::Logged)
    }
}

/// Workspace hosts are often configured without a scheme
fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
