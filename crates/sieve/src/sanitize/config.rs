use serde::Deserialize;

/// Tool name the serving endpoint uses when the primary agent hands work to a sub-agent
pub const DATABRICKS_TOOL_CALL_ID: &str = "databricks-tool-call";

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Constants the sanitizer matches against
///
/// Changing these changes which fragments are gated or rewritten, not the algorithm.
pub struct SanitizerConfig {
    /// Tool name whose invocations are rewritten into quotes
    #[serde(default = "default_tool_call_id")]
    pub tool_call_id: String,
    /// Input field holding the human readable request of a tool invocation
    #[serde(default = "default_request_field")]
    pub request_field: String,
    /// Speaker names starting with any of these belong to the primary agent
    #[serde(default = "default_primary_agent_prefixes")]
    pub primary_agent_prefixes: Vec<String>,
    #[serde(default = "default_identity_open")]
    pub identity_open: String,
    #[serde(default = "default_identity_close")]
    pub identity_close: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            tool_call_id: default_tool_call_id(),
            request_field: default_request_field(),
            primary_agent_prefixes: default_primary_agent_prefixes(),
            identity_open: default_identity_open(),
            identity_close: default_identity_close(),
        }
    }
}

impl SanitizerConfig {
    pub fn is_primary_agent(&self, identity: &str) -> bool {
        self.primary_agent_prefixes
            .iter()
            .any(|prefix| identity.starts_with(prefix.as_str()))
    }
}

fn default_tool_call_id() -> String {
    DATABRICKS_TOOL_CALL_ID.to_string()
}

fn default_request_field() -> String {
    "request".to_string()
}

fn default_primary_agent_prefixes() -> Vec<String> {
    vec!["ma-".to_string(), "sa-".to_string()]
}

fn default_identity_open() -> String {
    "<name>".to_string()
}

fn default_identity_close() -> String {
    "</name>".to_string()
}
