use thiserror::Error;

use crate::protocol::FinishReason;

pub type GeminiResult<T> = std::result::Result<T, GeminiError>;

/// Errors surfaced by the adapter.
///
/// None of them are retried or recovered from inside this crate.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The prompt variant has no Gemini handling path.
    #[error("Unsupported prompt type: {0}")]
    UnsupportedPromptType(&'static str),

    /// The requested model is not one Gemini knows.
    #[error("Unsupported model identifier: '{0}'")]
    UnsupportedModel(String),

    /// The model hint in the prompt context did not hold exactly one value.
    #[error("Expected exactly one model identifier in the prompt context, found {count}")]
    AmbiguousModelHint { count: usize },

    /// A structural element required by the conversion is missing or misplaced.
    #[error("Malformed content: {0}")]
    MalformedContent(String),

    /// The backend stopped for a reason with no stop reason equivalent.
    #[error("Finish reason {0} has no stop reason mapping")]
    UnmappedFinishReason(FinishReason),

    /// The parameters variant does not belong with the prompt variant.
    #[error("A {prompt} prompt requires {expected} parameters, got {found} parameters")]
    ParameterMismatch {
        prompt: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The backend call itself failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Failures of the transport collaborator, passed through unchanged.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No API key available to authenticate the request.
    #[error("No API key configured for the Google provider")]
    MissingApiKey,

    /// Authentication failed (missing or invalid API key).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Insufficient quota or credits.
    #[error("Insufficient quota: {0}")]
    InsufficientQuota(String),

    /// Model not found at the provider.
    #[error("{0}")]
    ModelNotFound(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded { message: String },

    /// Provider API returned any other error status.
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request could not be encoded or the response could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BackendError {
    /// Classifies a non-success HTTP status returned by the API.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::AuthenticationFailed(message),
            403 => Self::InsufficientQuota(message),
            404 => Self::ModelNotFound(message),
            429 => Self::RateLimitExceeded { message },
            400 => Self::InvalidRequest(message),
            _ => Self::ProviderApiError { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_http_statuses() {
        insta::assert_debug_snapshot!(
            [400, 401, 403, 404, 429, 503].map(|status| BackendError::from_status(status, "boom".to_string())),
            @r#"
        [
            InvalidRequest(
                "boom",
            ),
            AuthenticationFailed(
                "boom",
            ),
            InsufficientQuota(
                "boom",
            ),
            ModelNotFound(
                "boom",
            ),
            RateLimitExceeded {
                message: "boom",
            },
            ProviderApiError {
                status: 503,
                message: "boom",
            },
        ]
        "#
        );
    }

    #[test]
    fn backend_errors_pass_through_transparently() {
        let error = GeminiError::from(BackendError::RateLimitExceeded {
            message: "slow down".to_string(),
        });

        insta::assert_snapshot!(error, @"Rate limit exceeded: slow down");
    }
}
