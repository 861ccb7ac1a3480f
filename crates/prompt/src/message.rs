use serde::{Deserialize, Serialize};

use crate::Literal;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions steering the model. Allowed only as the first message.
    System,
    User,
    Assistant,
}

/// A single turn in a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Literal,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<Literal>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<Literal>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<Literal>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<Literal>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
