use serde::{Deserialize, Serialize};

use crate::{ChatMessage, Context, Literal};

/// Every kind of prompt the agnostic model knows about.
///
/// Adapters match on this exhaustively. A variant an adapter has no path for
/// is rejected with the name returned by [`Prompt::kind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prompt {
    Text(TextPrompt),
    Chat(ChatPrompt),
    Image(ImagePrompt),
}

impl Prompt {
    pub fn kind(&self) -> &'static str {
        match self {
            Prompt::Text(_) => "text",
            Prompt::Chat(_) => "chat",
            Prompt::Image(_) => "image",
        }
    }
}

/// Prompt continued by the model as free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrompt {
    pub prefix: Literal,
    #[serde(default)]
    pub context: Context,
}

impl TextPrompt {
    pub fn new(prefix: impl Into<Literal>) -> Self {
        Self {
            prefix: prefix.into(),
            context: Context::default(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }
}

/// Ordered conversation the model answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPrompt {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub context: Context,
}

impl ChatPrompt {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            context: Context::default(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }
}

/// Request to render an image from a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePrompt {
    pub description: Literal,
    #[serde(default)]
    pub context: Context,
}

impl ImagePrompt {
    pub fn new(description: impl Into<Literal>) -> Self {
        Self {
            description: description.into(),
            context: Context::default(),
        }
    }
}

impl From<TextPrompt> for Prompt {
    fn from(prompt: TextPrompt) -> Self {
        Self::Text(prompt)
    }
}

impl From<ChatPrompt> for Prompt {
    fn from(prompt: ChatPrompt) -> Self {
        Self::Chat(prompt)
    }
}

impl From<ImagePrompt> for Prompt {
    fn from(prompt: ImagePrompt) -> Self {
        Self::Image(prompt)
    }
}
