use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The author of a message
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }
}
