use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Databricks token unavailable: {0}")]
    MissingToken(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Trace rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub type TraceResult<T> = Result<T, TraceError>;
