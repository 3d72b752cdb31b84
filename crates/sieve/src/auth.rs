use async_trait::async_trait;

use crate::errors::{TraceError, TraceResult};

pub const DATABRICKS_TOKEN_VAR: &str = "DATABRICKS_TOKEN";

/// Source of bearer tokens for Databricks APIs
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> TraceResult<String>;
}

/// A fixed personal access token
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> TraceResult<String> {
        Ok(self.token.clone())
    }
}

/// Reads the token from the environment on every call, so a rotated token is picked up
pub struct EnvTokenProvider {
    var: String,
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(DATABRICKS_TOKEN_VAR)
    }
}

impl EnvTokenProvider {
    pub fn new<S: Into<String>>(var: S) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn token(&self) -> TraceResult<String> {
        match std::env::var(&self.var) {
            Ok(token) if !token.is_empty() => Ok(token),
            _ => Err(TraceError::MissingToken(format!("{} is not set", self.var))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticTokenProvider::new("dapi-123");
        assert_eq!(provider.token().await.unwrap(), "dapi-123");
    }

    #[tokio::test]
    #[serial]
    async fn test_env_token() {
        env::set_var("SIEVE_TEST_TOKEN", "dapi-env");
        let provider = EnvTokenProvider::new("SIEVE_TEST_TOKEN");
        assert_eq!(provider.token().await.unwrap(), "dapi-env");

        env::remove_var("SIEVE_TEST_TOKEN");
        assert!(matches!(
            provider.token().await,
            Err(TraceError::MissingToken(_))
        ));
    }
}
