use super::fragment::Fragment;
use super::role::Role;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A message to or from the chat backend
pub struct Message {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub parts: Vec<Fragment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Message {
    pub fn new(role: Role) -> Self {
        Message {
            id: Uuid::new_v4().to_string(),
            role,
            parts: Vec::new(),
            metadata: None,
        }
    }

    /// Create a new user message with a fresh id
    pub fn user() -> Self {
        Self::new(Role::User)
    }

    /// Create a new assistant message with a fresh id
    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = id.into();
        self
    }

    /// Add any Fragment to the message
    pub fn with_part(mut self, part: Fragment) -> Self {
        self.parts.push(part);
        self
    }

    /// Add text content to the message
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_part(Fragment::text(text))
    }

    /// Add a tool invocation to the message
    pub fn with_tool_invocation<S: Into<String>>(self, tool_name: S, input: Value) -> Self {
        self.with_part(Fragment::tool_invocation(tool_name, input))
    }

    /// Copy of this message carrying different parts
    pub fn with_parts(&self, parts: Vec<Fragment>) -> Self {
        Message {
            id: self.id.clone(),
            role: self.role,
            parts,
            metadata: self.metadata.clone(),
        }
    }

    /// Whether anything in this message would be shown to the user
    pub fn has_visible_content(&self) -> bool {
        !self.parts.is_empty()
    }

    /// Concatenated text of all text parts
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(Fragment::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}
