//! The seam between the adapter and whatever actually talks to Gemini.

mod google;
mod http_client;

use async_trait::async_trait;

pub use self::google::GoogleClient;
use crate::{
    error::BackendError,
    model::GeminiModel,
    protocol::{GenerateContentRequest, GenerateContentResponse},
};

/// Invokes `generateContent` on a Gemini model.
///
/// Retries, connection reuse and timeouts belong to the implementation. The adapter
/// calls this exactly once per request and hands any error back to its caller untouched.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(
        &self,
        model: GeminiModel,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, BackendError>;
}
