//! Sampling and limit knobs shared by every backend.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Sampling strategy. Temperature and nucleus sampling are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Randomness of generation. Higher values produce more varied output.
    Temperature(f32),

    /// Cumulative probability mass of the tokens considered at each step.
    TopP(f32),
}

/// Upper bound on generated tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenLimit {
    /// Whatever the model allows.
    #[default]
    Max,
    Bounded(u32),
}

/// Parameters for a plain text completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionParameters {
    pub sampling: Option<Sampling>,
    #[serde(default)]
    pub token_limit: TokenLimit,
    /// Sequences that end generation, in the order given.
    #[serde(default)]
    pub stop_sequences: IndexSet<String>,
}

/// Parameters for a chat completion. Same knobs as [`CompletionParameters`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionParameters {
    pub sampling: Option<Sampling>,
    #[serde(default)]
    pub token_limit: TokenLimit,
    #[serde(default)]
    pub stop_sequences: IndexSet<String>,
}

impl From<ChatCompletionParameters> for CompletionParameters {
    fn from(parameters: ChatCompletionParameters) -> Self {
        let ChatCompletionParameters {
            sampling,
            token_limit,
            stop_sequences,
        } = parameters;

        Self {
            sampling,
            token_limit,
            stop_sequences,
        }
    }
}

impl From<CompletionParameters> for ChatCompletionParameters {
    fn from(parameters: CompletionParameters) -> Self {
        let CompletionParameters {
            sampling,
            token_limit,
            stop_sequences,
        } = parameters;

        Self {
            sampling,
            token_limit,
            stop_sequences,
        }
    }
}

/// Parameters passed to the polymorphic completion entry point.
///
/// The variant must agree with the prompt: text prompts take
/// [`Parameters::Completion`], chat prompts take [`Parameters::Chat`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parameters {
    Completion(CompletionParameters),
    Chat(ChatCompletionParameters),
}

impl Parameters {
    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Parameters::Completion(_) => "completion",
            Parameters::Chat(_) => "chat",
        }
    }
}

impl From<CompletionParameters> for Parameters {
    fn from(parameters: CompletionParameters) -> Self {
        Self::Completion(parameters)
    }
}

impl From<ChatCompletionParameters> for Parameters {
    fn from(parameters: ChatCompletionParameters) -> Self {
        Self::Chat(parameters)
    }
}

impl TryFrom<Parameters> for CompletionParameters {
    type Error = Parameters;

    fn try_from(parameters: Parameters) -> Result<Self, Self::Error> {
        match parameters {
            Parameters::Completion(parameters) => Ok(parameters),
            other => Err(other),
        }
    }
}

impl TryFrom<Parameters> for ChatCompletionParameters {
    type Error = Parameters;

    fn try_from(parameters: Parameters) -> Result<Self, Self::Error> {
        match parameters {
            Parameters::Chat(parameters) => Ok(parameters),
            other => Err(other),
        }
    }
}
