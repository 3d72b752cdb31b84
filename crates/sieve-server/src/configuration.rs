use crate::error::{to_env_var, ConfigError, ENV_PREFIX};
use config::{Config, Environment};
use serde::Deserialize;
use sieve::SanitizerConfig;
use std::net::{AddrParseError, SocketAddr};

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DatabricksSettings {
    /// Workspace host, used for trace upload
    #[serde(default)]
    pub host: Option<String>,
    /// Personal access token; when unset the token is read from `DATABRICKS_TOKEN` per request
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub serving_endpoint: Option<String>,
    /// MLflow experiment receiving chat traces
    #[serde(default)]
    pub serving_experiment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: Option<String>,
}

impl DatabaseSettings {
    /// Chat history is only offered when a database is configured
    pub fn is_available(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub databricks: DatabricksSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("sanitizer.primary_agent_prefixes"),
            )
            .build()?;

        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        match result {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    // "missing field `host`"
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("SIEVE_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.databricks.host, None);
        assert_eq!(settings.databricks.serving_endpoint, None);
        assert!(!settings.database.is_available());
        assert_eq!(settings.sanitizer, SanitizerConfig::default());
    }

    #[test]
    #[serial]
    fn test_databricks_settings() {
        clean_env();
        env::set_var("SIEVE_DATABRICKS__HOST", "https://adb-1.azuredatabricks.net");
        env::set_var("SIEVE_DATABRICKS__TOKEN", "dapi-123");
        env::set_var("SIEVE_DATABRICKS__SERVING_ENDPOINT", "agents-endpoint");
        env::set_var("SIEVE_DATABRICKS__SERVING_EXPERIMENT", "1234567890");
        env::set_var("SIEVE_DATABASE__URL", "postgres://localhost/chat");

        let settings = Settings::new().unwrap();
        assert_eq!(
            settings.databricks.host.as_deref(),
            Some("https://adb-1.azuredatabricks.net")
        );
        assert_eq!(settings.databricks.token.as_deref(), Some("dapi-123"));
        assert_eq!(
            settings.databricks.serving_endpoint.as_deref(),
            Some("agents-endpoint")
        );
        assert_eq!(
            settings.databricks.serving_experiment.as_deref(),
            Some("1234567890")
        );
        assert!(settings.database.is_available());

        clean_env();
    }

    #[test]
    #[serial]
    fn test_sanitizer_overrides() {
        clean_env();
        env::set_var("SIEVE_SANITIZER__TOOL_CALL_ID", "handoff");
        env::set_var("SIEVE_SANITIZER__PRIMARY_AGENT_PREFIXES", "lead-,main-");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.sanitizer.tool_call_id, "handoff");
        assert_eq!(
            settings.sanitizer.primary_agent_prefixes,
            vec!["lead-", "main-"]
        );
        assert_eq!(settings.sanitizer.request_field, "request");

        clean_env();
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("SIEVE_SERVER__PORT", "8080");
        env::set_var("SIEVE_SERVER__HOST", "0.0.0.0");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");

        clean_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port() {
        clean_env();
        env::set_var("SIEVE_SERVER__PORT", "not-a-port");

        assert!(matches!(Settings::new(), Err(ConfigError::Other(_))));

        clean_env();
    }

    #[test]
    fn test_socket_addr_conversion() {
        let server_settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        let addr = server_settings.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }
}
