//! Backend-agnostic prompt, message and completion types.
//!
//! Every provider adapter consumes these shapes at its outer boundary and
//! produces them back from whatever its backend returns:
//!
//! ```text
//! Prompt + Parameters → adapter → backend → adapter → Completion
//! ```

mod completion;
mod context;
mod function;
mod literal;
mod message;
mod parameters;
mod prompt;

pub use completion::{ChatCompletion, Completion, StopReason, TextCompletion};
pub use context::{Context, ContextKey};
pub use function::{FunctionCall, FunctionDefinition, ParameterSchema};
pub use literal::{CodeBlock, Fragment, Literal};
pub use message::{ChatMessage, Role};
pub use parameters::{ChatCompletionParameters, CompletionParameters, Parameters, Sampling, TokenLimit};
pub use prompt::{ChatPrompt, ImagePrompt, Prompt, TextPrompt};

use serde::{Deserialize, Serialize};

/// Identifier of a concrete model, as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelIdentifier(String);

impl ModelIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelIdentifier {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
