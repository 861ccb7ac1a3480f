//! Conversions between the agnostic prompt model and the Gemini wire types.

mod from_google;
mod to_google;

pub(crate) use from_google::{function_calls_of, text_of};
pub use to_google::{chat_generation_config, generation_config};
pub(crate) use to_google::{Conversation, split_conversation};
