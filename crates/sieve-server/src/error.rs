use thiserror::Error;

pub const ENV_PREFIX: &str = "SIEVE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Environment variable that sets a dotted config path, e.g. `server.port` -> `SIEVE_SERVER__PORT`
pub fn to_env_var(field_path: &str) -> String {
    let path = field_path
        .split('.')
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("__");
    format!("{}_{}", ENV_PREFIX, path)
}
