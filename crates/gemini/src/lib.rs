//! Google Gemini adapter for the agnostic prompt model.
//!
//! [`GeminiAdapter`] turns [`prompt::Prompt`]s into `generateContent` requests and maps
//! the first candidate of the response back into a [`prompt::Completion`]. The HTTP side
//! sits behind [`GenerativeBackend`]; [`GoogleClient`] is the implementation used in
//! production.

mod adapter;
mod convert;
mod error;
mod model;
pub mod protocol;
mod provider;

pub use adapter::GeminiAdapter;
pub use convert::{chat_generation_config, generation_config};
pub use error::{BackendError, GeminiError, GeminiResult};
pub use model::{DEFAULT_MODEL, GeminiModel, available_models};
pub use provider::{GenerativeBackend, GoogleClient};
