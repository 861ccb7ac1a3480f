use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ChatMessage, ChatPrompt};

/// Result of a completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Completion {
    Text(TextCompletion),
    Chat(ChatCompletion),
}

/// Free text produced for a [`crate::TextPrompt`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCompletion {
    pub text: String,
}

/// Message produced for a [`ChatPrompt`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// The prompt this completion answers.
    pub prompt: ChatPrompt,
    pub message: ChatMessage,
    pub stop_reason: StopReason,
}

/// Why generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum StopReason {
    /// The model finished its turn.
    EndTurn,

    /// The token limit was reached. The message may be cut off.
    MaxTokens,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => f.write_str("endTurn"),
            StopReason::MaxTokens => f.write_str("maxTokens"),
        }
    }
}
